use std::path::PathBuf;

use jobsift::RecordStore;
use jobsift::compose::{ComposeRequest, Composer, ListComposer, ResponseFocus};
use jobsift::search::{ExperienceTier, QueryFilter, SearchPipeline};
use jobsift::test_utils::{TestCase, run_table_tests};

fn fixture_store() -> RecordStore {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/jobs.csv");
    RecordStore::load(&path).expect("load fixture table")
}

fn titles(store: &RecordStore, query: &str) -> Vec<String> {
    SearchPipeline::default()
        .run(store, query)
        .hits
        .iter()
        .map(|hit| store.get(hit.position).expect("valid position").title.clone())
        .collect()
}

#[test]
fn query_filter_extraction() -> Result<(), String> {
    let cases = vec![
        TestCase {
            name: "all three",
            input: "fresher jobs with salary > 30,000 in New Delhi",
            expected: QueryFilter {
                salary_above: Some(30000),
                experience: Some(ExperienceTier::Fresher),
                location: Some("New Delhi".to_string()),
            },
            should_panic: false,
        },
        TestCase {
            name: "none",
            input: "show me jobs",
            expected: QueryFilter::default(),
            should_panic: false,
        },
        TestCase {
            name: "case insensitive tier",
            input: "SENIOR roles",
            expected: QueryFilter {
                experience: Some(ExperienceTier::Senior),
                ..QueryFilter::default()
            },
            should_panic: false,
        },
    ];

    run_table_tests(cases, QueryFilter::from_query)
}

#[test]
fn filters_narrow_fixture_table() {
    let store = fixture_store();
    assert_eq!(store.len(), 5);

    assert_eq!(
        titles(&store, "fresher engineering jobs with salary > 30000 in Delhi"),
        ["Site Engineer"]
    );
    assert_eq!(titles(&store, "jobs in Jaipur"), ["Lecturer"]);
    assert!(titles(&store, "jobs in Atlantis").is_empty());
}

#[test]
fn salary_threshold_is_strict() {
    let store = fixture_store();
    let above = titles(&store, "salary > 52000");
    assert!(above.contains(&"Lecturer".to_string()));
    assert!(!above.contains(&"Accountant".to_string()));
}

#[test]
fn unparsable_salary_never_passes_threshold() {
    let store = fixture_store();
    let hits = titles(&store, "Data Analyst salary > 100");
    assert!(!hits.contains(&"Data Analyst".to_string()));
}

#[test]
fn final_limit_caps_results() {
    let store = fixture_store();
    let outcome = SearchPipeline::new(20, 2).run(&store, "jobs");
    assert_eq!(outcome.hits.len(), 2);
    assert_eq!(outcome.candidates, 5);
}

#[test]
fn outcome_feeds_offline_composer() {
    let store = fixture_store();
    let outcome = SearchPipeline::default().run(&store, "experience needed for jobs in Mumbai");
    let request = ComposeRequest::from_outcome(&outcome);

    assert_eq!(request.focus, Some(ResponseFocus::Experience));
    let answer = ListComposer.compose(&request).expect("list composer");
    assert!(answer.contains("Accountant at Bank of Trust"));
    assert!(answer.contains("Exp: 5+ Years"));
}
