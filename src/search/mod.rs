//! Retrieval pipeline for job records
//!
//! Two stages over the full in-memory store: fuzzy ranking of every
//! record's rendering against the raw query, then exact narrowing by the
//! salary / experience / location constraints extracted from that query.

use serde::Serialize;
use tracing::info;

use crate::config::SearchConfig;
use crate::core::store::RecordStore;

pub mod filter;
pub mod fuzz;
pub mod query;
pub mod ranker;

pub use query::{ExperienceTier, QueryFilter};
pub use ranker::{ApproximateRanker, RankedHit};

/// Final result of one query.
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    pub query: String,
    pub filter: QueryFilter,
    /// Hits surviving both stages, best first, at most the final limit.
    pub hits: Vec<RankedHit>,
    /// How many hits the approximate stage produced.
    pub candidates: usize,
}

impl SearchOutcome {
    /// No job matched; callers report "no matching jobs" rather than fail.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Rendered lines of the final hits.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.hits.iter().map(|hit| hit.text.clone()).collect()
    }
}

/// Query pipeline: extractor and ranker run independently on the raw
/// query, the filter engine merges them, then the list is cut to the final
/// limit.
#[derive(Debug, Clone, Copy)]
pub struct SearchPipeline {
    ranker: ApproximateRanker,
    final_limit: usize,
}

impl Default for SearchPipeline {
    fn default() -> Self {
        Self::new(20, 5)
    }
}

impl SearchPipeline {
    #[must_use]
    pub const fn new(approx_limit: usize, final_limit: usize) -> Self {
        Self {
            ranker: ApproximateRanker::new(approx_limit),
            final_limit,
        }
    }

    #[must_use]
    pub const fn from_config(config: &SearchConfig) -> Self {
        Self {
            ranker: ApproximateRanker::new(config.approx_limit)
                .with_normalization(config.normalize_text),
            final_limit: config.final_limit,
        }
    }

    #[must_use]
    pub const fn with_limits(
        mut self,
        approx_limit: Option<usize>,
        final_limit: Option<usize>,
    ) -> Self {
        if let Some(limit) = approx_limit {
            self.ranker =
                ApproximateRanker::new(limit).with_normalization(self.ranker.normalizes());
        }
        if let Some(limit) = final_limit {
            self.final_limit = limit;
        }
        self
    }

    #[must_use]
    pub fn run(&self, store: &RecordStore, query: &str) -> SearchOutcome {
        let filter = QueryFilter::from_query(query);
        let ranked = self.ranker.rank(store, query);
        let candidates = ranked.len();

        let mut hits = filter::apply(store, ranked, &filter);
        hits.truncate(self.final_limit);

        info!(
            candidates,
            returned = hits.len(),
            store = store.len(),
            "query answered"
        );
        SearchOutcome {
            query: query.to_string(),
            filter,
            hits,
            candidates,
        }
    }
}
