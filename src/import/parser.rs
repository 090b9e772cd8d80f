//! Listing parser: recovers job records from a flattened line stream.
//!
//! Listing pages print each job title twice in a row, followed by the
//! organization. The parser anchors on that repetition and then looks a
//! bounded number of lines ahead for the salary/experience line; the two
//! lines after it are taken as qualification and location.
//!
//! The scan is an explicit state machine so each transition can be audited
//! and tested on its own. It is heuristic, not a grammar:
//! - a coincidental repeated line anywhere starts a record,
//! - after a record the scan resumes three lines past the title pair, which
//!   does not guarantee realignment with the next pair when a record's
//!   trailing fields span a different number of lines.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::trace;

use crate::core::record::JobRecord;

/// First lookahead offset (past the title anchor) checked for a salary line.
pub const WINDOW_FIRST: usize = 3;
/// Last lookahead offset checked for a salary line.
pub const WINDOW_LAST: usize = 11;
/// Lines skipped after emitting a record.
pub const TITLE_BLOCK_ADVANCE: usize = 3;

static CURRENCY_SALARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"₹\s*[\d,]+(?:\s*-\s*₹?[\d,]+)?").expect("valid regex")
});
static BARE_SALARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{3,6}(?:\s*-\s*\d{3,6})?").expect("valid regex"));
static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{3,6}").expect("valid regex"));
static EXPERIENCE_YEARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\+?\s*Years").expect("valid regex"));

/// Whether a line looks like the salary/experience line of a listing.
#[must_use]
pub fn is_salary_line(line: &str) -> bool {
    line.contains("Fresher")
        || line.contains("Years")
        || line.contains('₹')
        || DIGIT_RUN.is_match(line)
}

/// Salary text from a salary line: a currency amount or range when present,
/// otherwise the first bare run of 3-6 digits (optionally a range).
#[must_use]
pub fn extract_salary(line: &str) -> String {
    CURRENCY_SALARY
        .find(line)
        .or_else(|| BARE_SALARY.find(line))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Experience text from a salary line: `Fresher`, or `<N>+ Years`.
#[must_use]
pub fn extract_experience(line: &str) -> String {
    if line.contains("Fresher") {
        return "Fresher".to_string();
    }
    EXPERIENCE_YEARS
        .find(line)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Scanner state. `anchor` is always the index of the first title line of
/// the record being assembled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanState {
    /// Looking for two identical adjacent lines starting at `at`.
    SeekTitle { at: usize },
    /// Probing `anchor + offset` for the salary/experience line.
    SeekSalaryLine {
        anchor: usize,
        offset: usize,
        draft: JobRecord,
    },
    /// Taking line `at` as the qualification.
    SeekQualification {
        anchor: usize,
        at: usize,
        draft: JobRecord,
    },
    /// Taking line `at` as the location.
    SeekLocation {
        anchor: usize,
        at: usize,
        draft: JobRecord,
    },
    /// Fewer than two lines remain.
    Done,
}

/// Result of one scanner transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub next: ScanState,
    pub emitted: Option<JobRecord>,
    /// The emitted record's lookahead window held no salary line.
    pub window_exhausted: bool,
}

impl Transition {
    const fn to(next: ScanState) -> Self {
        Self {
            next,
            emitted: None,
            window_exhausted: false,
        }
    }

    const fn emit(record: JobRecord, anchor: usize) -> Self {
        Self {
            next: ScanState::SeekTitle {
                at: anchor + TITLE_BLOCK_ADVANCE,
            },
            emitted: Some(record),
            window_exhausted: false,
        }
    }

    const fn emit_without_details(record: JobRecord, anchor: usize) -> Self {
        let mut transition = Self::emit(record, anchor);
        transition.window_exhausted = true;
        transition
    }
}

/// Counters collected while parsing one page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ParseSummary {
    pub lines: usize,
    pub records: usize,
    /// Records whose window contained no salary/experience line.
    pub without_details: usize,
}

/// Heuristic parser over trimmed, non-empty lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListingParser;

impl ListingParser {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Parse a line stream into records (category unset).
    pub fn parse<S: AsRef<str>>(&self, lines: &[S]) -> Vec<JobRecord> {
        self.parse_with_summary(lines).0
    }

    pub fn parse_with_summary<S: AsRef<str>>(&self, lines: &[S]) -> (Vec<JobRecord>, ParseSummary) {
        let mut records = Vec::new();
        let mut summary = ParseSummary {
            lines: lines.len(),
            ..ParseSummary::default()
        };
        let mut state = ScanState::SeekTitle { at: 0 };

        while state != ScanState::Done {
            let Transition {
                next,
                emitted,
                window_exhausted,
            } = self.step(lines, state);
            if window_exhausted {
                summary.without_details += 1;
            }
            if let Some(record) = emitted {
                records.push(record);
            }
            state = next;
        }

        summary.records = records.len();
        (records, summary)
    }

    /// Advance the scanner by one transition.
    pub fn step<S: AsRef<str>>(&self, lines: &[S], state: ScanState) -> Transition {
        let line = |index: usize| lines.get(index).map(AsRef::<str>::as_ref);

        match state {
            ScanState::Done => Transition::to(ScanState::Done),

            ScanState::SeekTitle { at } => {
                let (Some(first), Some(second)) = (line(at), line(at + 1)) else {
                    return Transition::to(ScanState::Done);
                };
                if first != second {
                    return Transition::to(ScanState::SeekTitle { at: at + 1 });
                }
                trace!(at, title = first, "title pair");
                let draft = JobRecord::new(first, line(at + 2).unwrap_or_default());
                Transition::to(ScanState::SeekSalaryLine {
                    anchor: at,
                    offset: WINDOW_FIRST,
                    draft,
                })
            }

            ScanState::SeekSalaryLine {
                anchor,
                offset,
                mut draft,
            } => {
                let probe = anchor + offset;
                let Some(candidate) = line(probe).filter(|_| offset <= WINDOW_LAST) else {
                    trace!(anchor, "no salary line inside window");
                    return Transition::emit_without_details(draft, anchor);
                };
                if !is_salary_line(candidate) {
                    return Transition::to(ScanState::SeekSalaryLine {
                        anchor,
                        offset: offset + 1,
                        draft,
                    });
                }
                draft.salary = extract_salary(candidate);
                draft.experience = extract_experience(candidate);
                Transition::to(ScanState::SeekQualification {
                    anchor,
                    at: probe + 1,
                    draft,
                })
            }

            ScanState::SeekQualification {
                anchor,
                at,
                mut draft,
            } => {
                draft.qualification = line(at).unwrap_or_default().to_string();
                Transition::to(ScanState::SeekLocation {
                    anchor,
                    at: at + 1,
                    draft,
                })
            }

            ScanState::SeekLocation {
                anchor,
                at,
                mut draft,
            } => {
                draft.location = line(at).unwrap_or_default().to_string();
                Transition::emit(draft, anchor)
            }
        }
    }
}
