use std::fs;
use std::path::PathBuf;

use jobsift::Category;
use jobsift::config::Config;
use jobsift::test_utils::{TestCase, run_table_tests};

fn fixture_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(relative)
}

#[test]
fn config_search_and_composer_from_fixture() -> Result<(), String> {
    let cases = vec![
        TestCase {
            name: "offline",
            input: "tests/fixtures/configs/offline.toml",
            expected: (20usize, 5usize, false, false, "llama-3.1-8b-instant".to_string(), 3u32),
            should_panic: false,
        },
        TestCase {
            name: "tuned",
            input: "tests/fixtures/configs/tuned.toml",
            expected: (40usize, 3usize, true, true, "llama-3.3-70b-versatile".to_string(), 1u32),
            should_panic: false,
        },
    ];

    run_table_tests(cases, |relative_path| {
        let content = fs::read_to_string(fixture_path(relative_path)).expect("read fixture");
        let config = Config::from_toml(&content).expect("parse config");
        (
            config.search.approx_limit,
            config.search.final_limit,
            config.search.normalize_text,
            config.composer.enabled,
            config.composer.model,
            config.composer.max_retries,
        )
    })
}

#[test]
fn tuned_fixture_replaces_source_list() {
    let content =
        fs::read_to_string(fixture_path("tests/fixtures/configs/tuned.toml")).expect("read fixture");
    let config = Config::from_toml(&content).expect("parse config");

    assert_eq!(config.fetch.sources.len(), 1);
    assert_eq!(config.fetch.sources[0].category, Category::Science);
    assert_eq!(config.fetch.delay_ms, 0);
    // Untouched sections keep their defaults.
    assert_eq!(config.fetch.accept_language, "en-US,en;q=0.9");
    assert_eq!(config.composer.api_key_env, "GROQ_API_KEY");
}

#[test]
fn written_config_reads_back() {
    let content =
        fs::read_to_string(fixture_path("tests/fixtures/configs/tuned.toml")).expect("read fixture");
    let config = Config::from_toml(&content).expect("parse config");
    let again = Config::from_toml(&config.to_toml().expect("serialize")).expect("reparse");

    assert_eq!(again.search.approx_limit, config.search.approx_limit);
    assert_eq!(again.fetch.sources, config.fetch.sources);
    assert_eq!(again.composer.model, config.composer.model);
}

#[test]
fn inconsistent_limits_are_rejected() {
    let err = Config::from_toml("[search]\napprox_limit = 2\nfinal_limit = 5\n").unwrap_err();
    assert_eq!(err.code(), "config");
    assert!(err.to_string().contains("approx_limit"));
}
