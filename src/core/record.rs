//! Job record types and the rendering function.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::SiftError;

/// Listing category a record was harvested from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Engineering,
    Science,
    Commerce,
    Education,
}

impl Category {
    /// All categories in source order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Engineering,
            Self::Science,
            Self::Commerce,
            Self::Education,
        ]
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Engineering => "Engineering",
            Self::Science => "Science",
            Self::Commerce => "Commerce",
            Self::Education => "Education",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = SiftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|category| category.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| {
                SiftError::InvalidArgument(format!(
                    "unknown category {needle:?} (expected engineering|science|commerce|education)"
                ))
            })
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// One structured job listing.
///
/// Every field except `category` is free text recovered from the listing
/// page; secondary fields are empty strings when the parser could not find
/// them. Column names in the persisted table match the serde names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct JobRecord {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub organization: String,
    #[serde(default)]
    pub salary: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub qualification: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub category: Option<Category>,
}

impl JobRecord {
    /// Record with only the title block filled in.
    pub fn new(title: impl Into<String>, organization: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            organization: organization.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Title and organization are both present.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty() && !self.organization.trim().is_empty()
    }

    /// Category label, empty when the record was never tagged.
    #[must_use]
    pub fn category_label(&self) -> &'static str {
        self.category.as_ref().map_or("", Category::as_str)
    }

    /// Render the record as the single descriptive line used for ranking,
    /// display, and the composer context.
    #[must_use]
    pub fn render(&self) -> String {
        format!(
            "{} at {} | Salary: {} | Exp: {} | Qualification: {} | Location: {} | Category: {}",
            self.title,
            self.organization,
            self.salary,
            self.experience,
            self.qualification,
            self.location,
            self.category_label(),
        )
    }

    /// Numeric salary when the field is a plain number.
    ///
    /// Currency-decorated values, ranges and thousands separators all fail
    /// coercion and yield `None`.
    #[must_use]
    pub fn salary_value(&self) -> Option<f64> {
        self.salary
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
    }
}

impl fmt::Display for JobRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
