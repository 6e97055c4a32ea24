//! Property-based tests for the case converters and the key rewrite.

use std::collections::HashMap;

use keycase::inflection::case::{to_camel_case, to_dash_case, to_pascal_case, to_snake_case};
use keycase::transform_keys;
use proptest::prelude::*;
use serde_json::{Map, Value};

// ─────────────────────────────────────────────────────────────────────────────
// Strategies
// ─────────────────────────────────────────────────────────────────────────────

/// Canonical snake_case: lowercase words starting with a letter, joined by a
/// single `_`. Words after the first have at least two characters: two
/// capitals in a row read back as one acronym.
fn arb_snake_identifier() -> impl Strategy<Value = String> {
    snake_words("[a-z][a-z0-9]{0,6}")
}

/// As [`arb_snake_identifier`], but the first word is capitalised by
/// PascalCase too, so it needs two characters as well.
fn arb_pascal_safe_identifier() -> impl Strategy<Value = String> {
    snake_words("[a-z][a-z0-9]{1,6}")
}

fn snake_words(first: &'static str) -> impl Strategy<Value = String> {
    (first, prop::collection::vec("[a-z][a-z0-9]{1,6}", 0..4))
        .prop_map(|(first, rest)| std::iter::once(first).chain(rest).collect::<Vec<_>>().join("_"))
}

/// Any identifier from the converters' domain.
fn arb_identifier() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_:-]{0,24}"
}

fn arb_key() -> impl Strategy<Value = String> {
    prop_oneof![arb_snake_identifier(), arb_identifier()]
}

/// Arbitrary JSON, up to a few levels deep.
fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[a-zA-Z_ -]{0,12}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec((arb_key(), inner), 0..6)
                .prop_map(|pairs| Value::Object(pairs.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

/// Same variant, same array lengths, same scalars; only keys may differ.
///
/// Objects are checked key by key: each converted key holds the value of the
/// last source key that converted to it, and keys keep first-seen order.
fn same_shape(a: &Value, b: &Value, convert: fn(&str) -> String) -> bool {
    match (a, b) {
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(x, y)| same_shape(x, y, convert))
        }
        (Value::Object(x), Value::Object(y)) => {
            let mut order: Vec<String> = Vec::new();
            let mut last: HashMap<String, &Value> = HashMap::new();
            for (key, value) in x {
                let key = convert(key);
                if last.insert(key.clone(), value).is_none() {
                    order.push(key);
                }
            }
            y.keys().eq(order.iter())
                && last.iter().all(|(key, x)| y.get(key).is_some_and(|y| same_shape(x, y, convert)))
        }
        (x, y) => x == y,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Properties
// ─────────────────────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn camel_round_trips_canonical_snake(s in arb_snake_identifier()) {
        prop_assert_eq!(to_snake_case(&to_camel_case(&s)), s);
    }

    #[test]
    fn pascal_round_trips_canonical_snake(s in arb_pascal_safe_identifier()) {
        prop_assert_eq!(to_snake_case(&to_pascal_case(&s)), s);
    }

    #[test]
    fn dash_and_snake_differ_only_in_delimiter(s in arb_identifier()) {
        prop_assert_eq!(to_dash_case(&s).replace('-', "_"), to_snake_case(&s).replace('-', "_"));
    }

    #[test]
    fn snake_case_is_stable(s in arb_identifier()) {
        let once = to_snake_case(&s);
        prop_assert_eq!(to_snake_case(&once), once.clone());
        prop_assert!(!once.chars().any(|c| c.is_ascii_uppercase() || c == '-'));
    }

    #[test]
    fn camel_case_has_no_inner_delimiters(s in arb_snake_identifier()) {
        let camel = to_camel_case(&s);
        prop_assert!(!camel.contains('_') && !camel.contains('-'));
        prop_assert!(!camel.starts_with(|c: char| c.is_ascii_uppercase()));
    }

    #[test]
    fn transform_keys_preserves_shape(value in arb_json()) {
        for convert in [to_snake_case, to_camel_case, to_dash_case, to_pascal_case] {
            let out = transform_keys(value.clone(), &convert);
            prop_assert!(same_shape(&value, &out, convert), "{value} became {out}");
        }
    }

    #[test]
    fn transform_keys_with_identity_is_a_no_op(value in arb_json()) {
        prop_assert_eq!(transform_keys(value.clone(), &|k: &str| k.to_owned()), value);
    }
}
