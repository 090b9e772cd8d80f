//! Exact constraint filtering applied after approximate ranking.

use tracing::{debug, trace};

use crate::core::record::JobRecord;
use crate::core::store::RecordStore;
use crate::search::query::QueryFilter;
use crate::search::ranker::RankedHit;

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Strictly above the threshold; salaries that are not plain numbers never
/// pass.
#[allow(clippy::cast_precision_loss)]
fn salary_passes(record: &JobRecord, threshold: u64) -> bool {
    record
        .salary_value()
        .is_some_and(|salary| salary > threshold as f64)
}

fn experience_passes(record: &JobRecord, tier: &str) -> bool {
    !record.experience.is_empty() && contains_ignore_case(&record.experience, tier)
}

fn location_passes(record: &JobRecord, location: &str) -> bool {
    contains_ignore_case(&record.location, location)
}

/// Whether a single record satisfies every constraint that is set.
#[must_use]
pub fn matches(record: &JobRecord, filter: &QueryFilter) -> bool {
    filter
        .salary_above
        .is_none_or(|threshold| salary_passes(record, threshold))
        && filter
            .experience
            .is_none_or(|tier| experience_passes(record, tier.as_str()))
        && filter
            .location
            .as_deref()
            .is_none_or(|location| location_passes(record, location))
}

/// Narrow ranked hits to those whose record satisfies `filter`.
///
/// Hits are resolved through their store position. Salary, experience and
/// location constraints are applied in that order; survivors keep their
/// ranking order. An empty filter passes every hit through.
#[must_use]
pub fn apply(store: &RecordStore, hits: Vec<RankedHit>, filter: &QueryFilter) -> Vec<RankedHit> {
    if filter.is_empty() {
        return hits;
    }

    let before = hits.len();
    let mut survivors: Vec<(RankedHit, &JobRecord)> = hits
        .into_iter()
        .filter_map(|hit| {
            let record = store.get(hit.position);
            if record.is_none() {
                trace!(position = hit.position, "hit does not resolve to a record");
            }
            record.map(|record| (hit, record))
        })
        .collect();

    if let Some(threshold) = filter.salary_above {
        survivors.retain(|(_, record)| salary_passes(record, threshold));
        trace!(threshold, remaining = survivors.len(), "salary filter");
    }
    if let Some(tier) = filter.experience {
        survivors.retain(|(_, record)| experience_passes(record, tier.as_str()));
        trace!(%tier, remaining = survivors.len(), "experience filter");
    }
    if let Some(location) = filter.location.as_deref() {
        survivors.retain(|(_, record)| location_passes(record, location));
        trace!(location, remaining = survivors.len(), "location filter");
    }

    debug!(before, after = survivors.len(), ?filter, "structured filtering");
    survivors.into_iter().map(|(hit, _)| hit).collect()
}
