//! Property tests: the guard/throw contract over arbitrary values.
//!
//! For every runtime type `T` and value `v`, `T.is_type(v)` must hold
//! exactly when `T.from_value(v)` succeeds (absent a default), and the
//! nullable sibling must widen the admitted set by `null` and nothing
//! else.

use chrono::DateTime;
use proptest::prelude::*;
use runtype_core::{Value, boolean, date, number, string, strings, zero_or_one};

fn value_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        Just(Value::Undefined),
        any::<bool>().prop_map(Value::from),
        any::<f64>().prop_map(Value::Number),
        "[a-z]{0,8}".prop_map(Value::from),
        (0i64..4_000_000_000i64).prop_map(|secs| {
            Value::Date(DateTime::from_timestamp(secs, 0).expect("timestamp in range"))
        }),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,6}", inner, 0..4).prop_map(Value::Object),
        ]
    })
}

proptest! {
    #[test]
    fn guard_agrees_with_from(value in value_strategy()) {
        let types = [
            number(),
            string(),
            boolean(),
            zero_or_one(),
            date(),
            strings(["day", "night"]),
        ];
        for ty in types {
            prop_assert_eq!(ty.is_type(&value), ty.from_value(value.clone()).is_ok());
        }
    }

    #[test]
    fn from_all_is_identity_on_valid_input(numbers in prop::collection::vec(-1e9f64..1e9, 0..8)) {
        let raw: Vec<Value> = numbers.iter().copied().map(Value::from).collect();
        let out = number().from_all(raw.clone()).unwrap();
        prop_assert_eq!(out, raw);
    }

    #[test]
    fn or_null_widens_exactly_by_null(value in value_strategy()) {
        let ty = number();
        let widened = value.is_null() || ty.is_type(&value);
        prop_assert_eq!(ty.or_null().is_type(&value), widened);
    }
}
