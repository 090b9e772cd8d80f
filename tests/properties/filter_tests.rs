use proptest::prelude::*;

use jobsift::search::filter;
use jobsift::search::{ApproximateRanker, QueryFilter, SearchPipeline};
use jobsift::test_utils::fixtures::sample_store;

fn query_strategy() -> impl Strategy<Value = String> {
    (
        prop::option::of(1000u32..80000),
        prop::option::of(prop::sample::select(vec!["fresher", "senior", "mid"])),
        prop::option::of(prop::sample::select(vec!["Delhi", "Pune", "Mumbai", "Goa"])),
    )
        .prop_map(|(salary, tier, location)| {
            let mut query = String::from("jobs");
            if let Some(tier) = tier {
                query = format!("{tier} {query}");
            }
            if let Some(salary) = salary {
                query.push_str(&format!(" with salary > {salary}"));
            }
            if let Some(location) = location {
                query.push_str(&format!(" in {location}"));
            }
            query
        })
}

proptest! {
    #[test]
    fn filtering_is_idempotent(query in query_strategy()) {
        let store = sample_store();
        let parsed = QueryFilter::from_query(&query);
        let ranked = ApproximateRanker::new(20).rank(&store, &query);
        let once = filter::apply(&store, ranked, &parsed);
        let twice = filter::apply(&store, once.clone(), &parsed);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn survivors_satisfy_every_constraint(query in query_strategy()) {
        let store = sample_store();
        let outcome = SearchPipeline::default().run(&store, &query);
        for hit in &outcome.hits {
            let record = store.get(hit.position).unwrap();
            prop_assert!(filter::matches(record, &outcome.filter));
            prop_assert_eq!(&record.render(), &hit.text);
        }
    }

    #[test]
    fn raising_threshold_never_adds_results(
        low in prop_oneof![0u128..70_000, 0u128..u128::from(u64::MAX) * 4],
        bump in prop_oneof![0u128..20_000, 0u128..u128::from(u64::MAX)],
    ) {
        let store = sample_store();
        let count = |threshold: u128| {
            SearchPipeline::default()
                .run(&store, &format!("jobs salary > {threshold}"))
                .hits
                .len()
        };
        prop_assert!(count(low + bump) <= count(low));
    }

    #[test]
    fn hits_keep_ranked_order(query in query_strategy()) {
        let store = sample_store();
        let outcome = SearchPipeline::default().run(&store, &query);
        prop_assert!(outcome.hits.windows(2).all(|pair| pair[0].score >= pair[1].score));
        prop_assert!(outcome.hits.len() <= 5);
    }
}
