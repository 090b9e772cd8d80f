use proptest::prelude::*;

use jobsift::import::ListingParser;

fn distinct_neighbours(lines: &[String]) -> bool {
    lines.windows(2).all(|pair| pair[0] != pair[1])
}

proptest! {
    #[test]
    fn no_adjacent_duplicates_means_no_records(
        lines in prop::collection::vec("[A-Za-z0-9₹ ,+|-]{1,12}", 0..40)
            .prop_filter("adjacent duplicate", |lines| distinct_neighbours(lines))
    ) {
        prop_assert!(ListingParser::new().parse(&lines).is_empty());
    }

    #[test]
    fn every_record_comes_from_a_title_pair(
        lines in prop::collection::vec(prop::sample::select(vec![
            "Clerk", "Clerk", "Post Office", "18000", "Fresher", "2+ Years", "B.Com", "Delhi",
        ]), 0..60)
    ) {
        let records = ListingParser::new().parse(&lines);
        let pairs = lines.windows(2).filter(|pair| pair[0] == pair[1]).count();
        prop_assert!(records.len() <= pairs);
        for record in &records {
            prop_assert!(lines
                .windows(2)
                .any(|pair| pair[0] == pair[1] && pair[0] == record.title));
        }
    }

    #[test]
    fn parsing_is_deterministic(lines in prop::collection::vec("[a-c]{1,2}", 0..50)) {
        let parser = ListingParser::new();
        prop_assert_eq!(parser.parse(&lines), parser.parse(&lines));
    }
}
