use proptest::prelude::*;

use jobsift::{JobRecord, RecordStore};

fn record_strategy() -> impl Strategy<Value = JobRecord> {
    (
        prop::sample::select(vec!["Clerk", "Engineer", "Analyst", ""]),
        prop::sample::select(vec!["Post Office", "Metro", ""]),
        prop::sample::select(vec!["18000", "₹25,000", ""]),
    )
        .prop_map(|(title, org, salary)| {
            let mut record = JobRecord::new(title, org);
            record.salary = salary.to_string();
            record
        })
}

proptest! {
    #[test]
    fn store_has_no_duplicates_or_incomplete_records(
        records in prop::collection::vec(record_strategy(), 0..30)
    ) {
        let store = RecordStore::from_records(records.clone());
        for (i, a) in store.iter().enumerate() {
            prop_assert!(a.is_complete());
            for b in store.iter().skip(i + 1) {
                prop_assert_ne!(a, b);
            }
        }
        for record in records.iter().filter(|record| record.is_complete()) {
            prop_assert!(store.iter().any(|kept| kept == record));
        }
    }

    #[test]
    fn table_round_trips_through_csv(
        records in prop::collection::vec(record_strategy(), 0..20)
    ) {
        let store = RecordStore::from_records(records);
        let mut buffer = Vec::new();
        store.write_csv(&mut buffer).unwrap();
        let loaded = RecordStore::read_csv(buffer.as_slice()).unwrap();
        prop_assert_eq!(loaded.records(), store.records());
    }
}
