//! Category page harvesting
//!
//! Fetches each configured category page, flattens it to lines, runs the
//! listing parser and tags the records with the page's category. A failing
//! category is logged and skipped; the others still contribute.

use std::time::Duration;

use serde::Serialize;
use tracing::{info, warn};

use crate::config::SourceConfig;
use crate::core::record::{Category, JobRecord};
use crate::core::store::RecordStore;
use crate::error::Result;
use crate::import::ListingParser;

mod http;

pub use http::HttpListingSource;

/// Anything that can turn a listing URL into flattened page lines.
pub trait ListingSource {
    fn fetch_lines(&self, url: &str) -> Result<Vec<String>>;
}

/// A category that could not be harvested.
#[derive(Debug, Clone, Serialize)]
pub struct HarvestFailure {
    pub category: Category,
    pub url: String,
    pub reason: String,
}

/// Per-category record count.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryCount {
    pub category: Category,
    pub records: usize,
}

/// Outcome of one harvest run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HarvestReport {
    pub records: Vec<JobRecord>,
    pub counts: Vec<CategoryCount>,
    pub failures: Vec<HarvestFailure>,
}

impl HarvestReport {
    /// Deduplicated store built from every harvested record.
    #[must_use]
    pub fn into_store(self) -> RecordStore {
        RecordStore::from_records(self.records)
    }
}

/// Harvest every source in order, pausing `delay` between pages.
pub fn harvest(
    source: &dyn ListingSource,
    sources: &[SourceConfig],
    parser: &ListingParser,
    delay: Duration,
) -> HarvestReport {
    let mut report = HarvestReport::default();

    for (index, entry) in sources.iter().enumerate() {
        if index > 0 && !delay.is_zero() {
            std::thread::sleep(delay);
        }

        info!(category = %entry.category, url = %entry.url, "fetching category");
        let lines = match source.fetch_lines(&entry.url) {
            Ok(lines) => lines,
            Err(err) => {
                warn!(category = %entry.category, error = %err, "skipping category");
                report.failures.push(HarvestFailure {
                    category: entry.category,
                    url: entry.url.clone(),
                    reason: err.to_string(),
                });
                continue;
            }
        };

        let (records, summary) = parser.parse_with_summary(&lines);
        info!(
            category = %entry.category,
            lines = summary.lines,
            records = summary.records,
            without_details = summary.without_details,
            "parsed category page"
        );
        report.counts.push(CategoryCount {
            category: entry.category,
            records: records.len(),
        });
        report
            .records
            .extend(records.into_iter().map(|record| record.with_category(entry.category)));
    }

    report
}
