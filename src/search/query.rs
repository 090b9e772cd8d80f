//! Structured constraints extracted from a free-text query.

use std::fmt;
use std::num::IntErrorKind;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::SiftError;

static SALARY_THRESHOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)salary\s*>\s*([0-9,]+)").expect("valid regex"));
static EXPERIENCE_TIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(fresher|entry|junior|mid|senior)\b").expect("valid regex")
});
static LOCATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bin\s+([A-Za-z\s]+)").expect("valid regex"));

/// Digits with optional thousands separators. Values too large for `u64`
/// saturate so the constraint still excludes every record.
fn parse_threshold(raw: &str) -> Option<u64> {
    match raw.replace(',', "").parse::<u64>() {
        Ok(value) => Some(value),
        Err(err) if *err.kind() == IntErrorKind::PosOverflow => Some(u64::MAX),
        Err(_) => None,
    }
}

/// Fixed experience vocabulary recognised in queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceTier {
    Fresher,
    Entry,
    Junior,
    Mid,
    Senior,
}

impl ExperienceTier {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fresher => "fresher",
            Self::Entry => "entry",
            Self::Junior => "junior",
            Self::Mid => "mid",
            Self::Senior => "senior",
        }
    }
}

impl fmt::Display for ExperienceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExperienceTier {
    type Err = SiftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fresher" => Ok(Self::Fresher),
            "entry" => Ok(Self::Entry),
            "junior" => Ok(Self::Junior),
            "mid" => Ok(Self::Mid),
            "senior" => Ok(Self::Senior),
            other => Err(SiftError::InvalidArgument(format!(
                "unknown experience tier {other:?}"
            ))),
        }
    }
}

/// Constraints derived from one query. Every field is optional and
/// independent of the others.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryFilter {
    /// Keep records whose numeric salary is strictly greater.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_above: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<ExperienceTier>,
    /// Case-insensitive substring of the record's location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl QueryFilter {
    /// Extract constraints from a query. Case-insensitive; patterns that
    /// are absent leave their field unset.
    ///
    /// ```
    /// use jobsift::search::{ExperienceTier, QueryFilter};
    ///
    /// let filter = QueryFilter::from_query("fresher engineering jobs with salary > 30000 in Delhi");
    /// assert_eq!(filter.salary_above, Some(30000));
    /// assert_eq!(filter.experience, Some(ExperienceTier::Fresher));
    /// assert_eq!(filter.location.as_deref(), Some("Delhi"));
    /// ```
    #[must_use]
    pub fn from_query(query: &str) -> Self {
        let salary_above = SALARY_THRESHOLD
            .captures(query)
            .and_then(|caps| parse_threshold(&caps[1]));

        let experience = EXPERIENCE_TIER
            .captures(query)
            .and_then(|caps| caps[1].parse().ok());

        let location = LOCATION
            .captures(query)
            .map(|caps| caps[1].trim().to_string())
            .filter(|location| !location.is_empty());

        Self {
            salary_above,
            experience,
            location,
        }
    }

    /// No constraint is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.salary_above.is_none() && self.experience.is_none() && self.location.is_none()
    }
}
