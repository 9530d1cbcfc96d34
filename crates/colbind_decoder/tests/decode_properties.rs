//! Property tests for the decode contract.
//!
//! Rows are generated from the canonical six-field schema with well-formed
//! tokens, then perturbed to check sentinel, padding and policy behaviour.

use colbind_decoder::{
    DecoderConfig, FieldDescriptor, FieldType, RecordDecoder, RowDecodeError, Schema, Value,
};
use proptest::prelude::*;

fn sample_schema() -> Schema {
    Schema::new(
        "sample",
        vec![
            FieldDescriptor::required("str", 0, FieldType::String),
            FieldDescriptor::optional("opt_str", 1, FieldType::String),
            FieldDescriptor::required("integer", 2, FieldType::Integer),
            FieldDescriptor::required("floater", 3, FieldType::Float),
            FieldDescriptor::required("bool", 4, FieldType::Boolean),
            FieldDescriptor::optional("opt_int", 5, FieldType::Integer),
        ],
    )
    .unwrap()
}

/// A well-formed row plus the values it must decode to.
fn well_formed_row() -> impl Strategy<Value = (Vec<String>, Vec<Value>)> {
    (
        ".*",
        prop::option::of("[^\\s]{1,8}"),
        any::<i64>(),
        prop::num::f64::NORMAL | prop::num::f64::ZERO,
        any::<bool>(),
        prop::option::of(any::<i64>()),
    )
        .prop_map(|(s, opt_s, i, f, b, opt_i)| {
            let tokens = vec![
                s.clone(),
                opt_s.clone().unwrap_or_default(),
                i.to_string(),
                f.to_string(),
                b.to_string(),
                opt_i.map(|v| v.to_string()).unwrap_or_default(),
            ];
            let expected = vec![
                Value::String(s),
                Value::from(opt_s),
                Value::Integer(i),
                Value::Float(f),
                Value::Boolean(b),
                Value::from(opt_i),
            ];
            (tokens, expected)
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1_000))]

    /// In-bounds, well-formed rows decode to the coerced tokens in schema order.
    #[test]
    fn prop_well_formed_rows_decode((row, expected) in well_formed_row()) {
        let decoder = RecordDecoder::new(sample_schema());
        let record = decoder.decode(&row).unwrap();
        prop_assert_eq!(record.values(), expected.as_slice());
    }

    /// Decoding is idempotent.
    #[test]
    fn prop_decode_twice_is_equal((row, _) in well_formed_row()) {
        let decoder = RecordDecoder::new(sample_schema());
        prop_assert_eq!(decoder.decode(&row), decoder.decode(&row));
    }

    /// Extra trailing tokens never change the outcome.
    #[test]
    fn prop_trailing_tokens_ignored(
        (row, _) in well_formed_row(),
        extra in prop::collection::vec(".*", 1..4),
    ) {
        let decoder = RecordDecoder::new(sample_schema());
        let mut longer = row.clone();
        longer.extend(extra);
        prop_assert_eq!(decoder.decode(&row), decoder.decode(&longer));
    }

    /// Truncating a row fails exactly the fields whose column was cut off.
    #[test]
    fn prop_truncated_rows_report_missing_columns(
        (row, _) in well_formed_row(),
        keep in 0usize..6,
    ) {
        let decoder = RecordDecoder::new(sample_schema());
        let err = decoder.decode(&row[..keep]).unwrap_err();
        let positions: Vec<usize> = err.errors().iter().map(|e| e.position).collect();
        prop_assert_eq!(positions, (keep..6).collect::<Vec<_>>());
    }

    /// Fail-fast reports the first failure that accumulate-all reports.
    #[test]
    fn prop_fail_fast_agrees_with_first_aggregate_error(
        (mut row, _) in well_formed_row(),
        bad_int in "[a-z]{1,5}",
        bad_bool in "[0-9]{1,3}",
    ) {
        row[2] = bad_int;
        row[4] = bad_bool;
        let accumulate = RecordDecoder::new(sample_schema());
        let fail_fast = RecordDecoder::with_config(sample_schema(), DecoderConfig::fail_fast());

        let all = accumulate.decode(&row).unwrap_err();
        let first = fail_fast.decode(&row).unwrap_err();
        prop_assert_eq!(all.errors().len(), 2);
        prop_assert!(matches!(first, RowDecodeError::Field(_)));
        prop_assert_eq!(all.first(), first.first());
    }

    /// Sentinels decode to null whatever the declared type.
    #[test]
    fn prop_sentinel_always_null(sentinel in "[A-Za-z0-9]{0,6}", type_idx in 0usize..4) {
        let field_type = FieldType::all()[type_idx];
        let schema = Schema::new(
            "one",
            vec![FieldDescriptor::optional("v", 0, field_type)
                .with_null_sentinels([sentinel.clone()])],
        )
        .unwrap();
        let record = RecordDecoder::new(schema).decode(&[sentinel]).unwrap();
        prop_assert_eq!(record.get("v"), Some(&Value::Null));
    }
}
