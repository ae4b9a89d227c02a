//! Property tests for join keys and record fingerprints.

use finrec_core::record::build_record;
use finrec_core::scrub::{clean_numeric_str, composite_key};
use finrec_model::{RawRow, SourceMappings, SourceType};
use proptest::prelude::*;

fn ledger_row(qty: i64, moveorder: &str, depot: &str) -> RawRow {
    let pairs = [
        ("Move Date", "01/01/2023".to_string()),
        ("Item No.", "60330045".to_string()),
        ("Move Order", moveorder.to_string()),
        ("Lot Number", "L1".to_string()),
        ("Store", depot.to_string()),
        ("Qty", qty.to_string()),
        ("Value", "-1.00".to_string()),
    ];
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

proptest! {
    #[test]
    fn composite_keys_never_have_empty_segments(
        prefix in "[A-Za-z0-9]{0,10}",
        suffix in "[A-Za-z0-9]{0,10}",
    ) {
        let key = composite_key(&prefix, &suffix);
        let (left, right) = key.split_once('_').expect("separator present");
        prop_assert!(!left.is_empty());
        prop_assert!(!right.is_empty());
        if prefix.is_empty() {
            prop_assert_eq!(left, "MISSING");
        }
        if suffix.is_empty() {
            prop_assert_eq!(right, "MISSING");
        }
    }

    #[test]
    fn scrubbed_strings_contain_only_numeric_chars(raw in "\\PC{0,24}") {
        let cleaned = clean_numeric_str(&raw);
        prop_assert!(
            cleaned
                .chars()
                .all(|ch| ch.is_ascii_digit() || ch == '.' || ch == '-')
        );
    }

    #[test]
    fn fingerprints_are_stable_and_quantity_sensitive(
        qty in -10_000i64..10_000,
        moveorder in "[A-Z]{2}[0-9]{4}",
    ) {
        let mappings = SourceMappings::default();
        let row = ledger_row(qty, &moveorder, "709");
        let first = build_record(SourceType::Pkrd, &row, &mappings).unwrap();
        let second = build_record(SourceType::Pkrd, &row, &mappings).unwrap();
        prop_assert_eq!(&first.fingerprint, &second.fingerprint);

        let changed = ledger_row(qty + 1, &moveorder, "709");
        let other = build_record(SourceType::Pkrd, &changed, &mappings).unwrap();
        prop_assert_ne!(&first.fingerprint, &other.fingerprint);
    }

    #[test]
    fn fingerprints_differ_across_depots(
        qty in -100i64..100,
        depot_a in "[0-9]{3}",
        depot_b in "[0-9]{3}",
    ) {
        prop_assume!(depot_a != depot_b);
        let mappings = SourceMappings::default();
        let a = build_record(SourceType::Pkrd, &ledger_row(qty, "MM01", &depot_a), &mappings)
            .unwrap();
        let b = build_record(SourceType::Pkrd, &ledger_row(qty, "MM01", &depot_b), &mappings)
            .unwrap();
        prop_assert_ne!(a.fingerprint, b.fingerprint);
    }
}
