use std::fs;
use std::path::PathBuf;

use jobsift::import::{
    ListingParser, extract_experience, extract_salary, is_salary_line, lines_from_html,
    lines_from_text,
};
use jobsift::test_utils::{TestCase, run_table_tests};

fn fixture(relative: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(relative);
    fs::read_to_string(path).expect("read fixture")
}

#[test]
fn salary_line_fields() -> Result<(), String> {
    let case = |name, input, salary: &str, experience: &str| TestCase {
        name,
        input,
        expected: (true, salary.to_string(), experience.to_string()),
        should_panic: false,
    };
    let cases = vec![
        case("currency range", "₹40,000 - ₹60,000", "₹40,000 - ₹60,000", ""),
        case("currency with gap", "Salary ₹ 25,000 per month", "₹ 25,000", ""),
        case("bare with fresher", "35000 | Fresher", "35000", "Fresher"),
        case("bare range", "Pay 18000-22000", "18000-22000", ""),
        case("years only", "2+ Years", "", "2+ Years"),
        case("years without plus", "5 Years experience", "", "5 Years"),
        case("fresher only", "Fresher", "", "Fresher"),
        TestCase {
            name: "plain text",
            input: "B.Tech",
            expected: (false, String::new(), String::new()),
            should_panic: false,
        },
    ];

    run_table_tests(cases, |line: &str| {
        (
            is_salary_line(line),
            extract_salary(line),
            extract_experience(line),
        )
    })
}

#[test]
fn text_and_html_dumps_parse_alike() {
    let parser = ListingParser::new();
    let from_text = parser.parse(&lines_from_text(&fixture("listing.txt")));
    let from_html = parser.parse(&lines_from_html(&fixture("listing.html")));

    assert_eq!(from_text.len(), 3);
    assert_eq!(from_text, from_html);
}

#[test]
fn fixture_records_have_expected_fields() {
    let records = ListingParser::new().parse(&lines_from_text(&fixture("listing.txt")));

    let analyst = &records[0];
    assert_eq!(analyst.title, "Data Analyst");
    assert_eq!(analyst.organization, "Acme Corp");
    assert_eq!(analyst.salary, "₹40,000 - ₹60,000");
    assert_eq!(analyst.experience, "");
    assert_eq!(analyst.qualification, "B.Tech");
    assert_eq!(analyst.location, "Pune");

    let design = &records[2];
    assert_eq!(design.salary, "");
    assert_eq!(design.experience, "3+ Years");
    assert_eq!(design.qualification, "M.Tech");
    assert_eq!(design.location, "Bangalore");
    assert!(records.iter().all(|record| record.category.is_none()));
}
