//! Approximate ranking of every stored record against the raw query.

use serde::Serialize;
use tracing::debug;

use crate::core::store::RecordStore;
use crate::search::fuzz;

/// One ranked record. `position` identifies the record in the store the
/// ranking was computed over.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedHit {
    pub position: usize,
    pub score: f64,
    pub text: String,
}

/// Fuzzy top-N selector. Rescores the whole store on every call.
#[derive(Debug, Clone, Copy)]
pub struct ApproximateRanker {
    limit: usize,
    normalize: bool,
}

impl Default for ApproximateRanker {
    fn default() -> Self {
        Self::new(20)
    }
}

impl ApproximateRanker {
    #[must_use]
    pub const fn new(limit: usize) -> Self {
        Self {
            limit,
            normalize: false,
        }
    }

    /// Lowercase and strip punctuation from both sides before scoring.
    #[must_use]
    pub const fn with_normalization(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    #[must_use]
    pub const fn normalizes(&self) -> bool {
        self.normalize
    }

    fn score(&self, query: &str, text: &str) -> f64 {
        if self.normalize {
            fuzz::weighted_ratio(&fuzz::normalize(query), &fuzz::normalize(text))
        } else {
            fuzz::weighted_ratio(query, text)
        }
    }

    /// Top `limit` records by similarity, best first; equal scores keep
    /// store order.
    #[must_use]
    pub fn rank(&self, store: &RecordStore, query: &str) -> Vec<RankedHit> {
        let mut hits: Vec<RankedHit> = store
            .iter()
            .enumerate()
            .map(|(position, record)| {
                let text = record.render();
                RankedHit {
                    position,
                    score: self.score(query, &text),
                    text,
                }
            })
            .collect();

        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        hits.truncate(self.limit);

        debug!(
            scored = store.len(),
            kept = hits.len(),
            top = hits.first().map(|hit| hit.score),
            "approximate ranking"
        );
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::JobRecord;
    use crate::test_utils::fixtures::sample_store;

    #[test]
    fn best_match_first() {
        let hits = ApproximateRanker::new(5).rank(&sample_store(), "Accountant at Bank of Trust");
        assert_eq!(hits[0].text.split(" at ").next(), Some("Accountant"));
        assert!(hits.windows(2).all(|pair| pair[0].score >= pair[1].score));
    }

    #[test]
    fn limit_bounds_result_count() {
        let store = sample_store();
        assert_eq!(ApproximateRanker::new(2).rank(&store, "engineer").len(), 2);
        assert_eq!(ApproximateRanker::new(50).rank(&store, "engineer").len(), store.len());
        assert!(ApproximateRanker::new(0).rank(&store, "engineer").is_empty());
    }

    #[test]
    fn ties_keep_store_order() {
        let store = RecordStore::from_records(
            ["A", "B", "C"].map(|org| JobRecord::new("Same Title", org)),
        );
        let hits = ApproximateRanker::new(3).rank(&store, "");
        let positions: Vec<_> = hits.iter().map(|hit| hit.position).collect();
        assert_eq!(positions, [0, 1, 2]);
        assert!(hits.iter().all(|hit| hit.score == 0.0));
    }

    #[test]
    fn positions_resolve_to_rendered_record() {
        let store = sample_store();
        for hit in ApproximateRanker::new(10).rank(&store, "Delhi fresher") {
            assert_eq!(store.get(hit.position).unwrap().render(), hit.text);
        }
    }

    #[test]
    fn normalization_makes_case_irrelevant() {
        let store = sample_store();
        let ranker = ApproximateRanker::new(5).with_normalization(true);
        let upper = ranker.rank(&store, "LAB ASSISTANT");
        let lower = ranker.rank(&store, "lab assistant");
        assert_eq!(upper, lower);
    }
}
