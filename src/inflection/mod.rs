//! Key inflections and the recursive key rewrite.
//!
//! An [`Inflection`] names a naming convention. [`transform_keys`] walks any
//! JSON value and renames every object key with a converter, leaving values,
//! array order and value variants exactly as they were.

use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};

pub mod case;

/// A naming convention for JSON object keys.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Inflection {
    Snake,  // author_name
    Camel,  // authorName
    Dash,   // author-name
    Pascal, // AuthorName
}

impl Inflection {
    /// Returns the header value that selects this inflection (e.g. `"camel"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Snake  => "snake",
            Self::Camel  => "camel",
            Self::Dash   => "dash",
            Self::Pascal => "pascal",
        }
    }

    /// The built-in converter for this inflection.
    pub fn converter(self) -> fn(&str) -> String {
        match self {
            Self::Snake  => case::to_snake_case,
            Self::Camel  => case::to_camel_case,
            Self::Dash   => case::to_dash_case,
            Self::Pascal => case::to_pascal_case,
        }
    }
}

/// Returned by [`Inflection::from_str`] for an unrecognised value.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnknownInflection(pub String);

impl fmt::Display for UnknownInflection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown key inflection `{}`", self.0)
    }
}

impl std::error::Error for UnknownInflection {}

/// Parses a header value. Exact, case-sensitive match.
impl FromStr for Inflection {
    type Err = UnknownInflection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "snake"  => Ok(Self::Snake),
            "camel"  => Ok(Self::Camel),
            "dash"   => Ok(Self::Dash),
            "pascal" => Ok(Self::Pascal),
            other    => Err(UnknownInflection(other.to_owned())),
        }
    }
}

impl fmt::Display for Inflection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Renames every object key inside `value` with `convert`.
///
/// Arrays keep their order and length, scalars are returned as-is, and
/// string *values* are never converted. When two keys of one object convert
/// to the same name, the one visited last wins.
pub fn transform_keys(value: Value, convert: &dyn Fn(&str) -> String) -> Value {
    match value {
        Value::Array(items) => Value::Array(
            items.into_iter().map(|item| transform_keys(item, convert)).collect(),
        ),
        Value::Object(map) => {
            let mut out = Map::with_capacity(map.len());
            for (key, value) in map {
                out.insert(convert(&key), transform_keys(value, convert));
            }
            Value::Object(out)
        }
        scalar => scalar,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_known_inflections_only() {
        assert_eq!("camel".parse::<Inflection>(), Ok(Inflection::Camel));
        assert_eq!("dash".parse::<Inflection>(), Ok(Inflection::Dash));
        assert_eq!("pascal".parse::<Inflection>(), Ok(Inflection::Pascal));
        assert_eq!("snake".parse::<Inflection>(), Ok(Inflection::Snake));
        assert!("Camel".parse::<Inflection>().is_err());
        assert!("".parse::<Inflection>().is_err());
    }

    #[test]
    fn renames_nested_keys_but_not_values() {
        let input = json!({
            "post": {
                "author_name": "adam_smith",
                "tags": [{"tag_name": "econ"}, "plain_string", 3, null]
            },
            "is_draft": false
        });

        let out = transform_keys(input, &case::to_camel_case);

        assert_eq!(out, json!({
            "post": {
                "authorName": "adam_smith",
                "tags": [{"tagName": "econ"}, "plain_string", 3, null]
            },
            "isDraft": false
        }));
    }

    #[test]
    fn scalars_are_returned_unchanged() {
        for scalar in [json!("snake_value"), json!(1.5), json!(true), Value::Null] {
            assert_eq!(transform_keys(scalar.clone(), &case::to_dash_case), scalar);
        }
    }

    #[test]
    fn colliding_keys_keep_the_last_value() {
        let input = json!({"author_name": "first", "authorName": "second"});

        let out = transform_keys(input, &case::to_camel_case);

        assert_eq!(out, json!({"authorName": "second"}));
    }

    #[test]
    fn key_order_is_preserved() {
        let input = json!({"zeta_key": 1, "alpha_key": 2, "mid_key": 3});

        let out = transform_keys(input, &case::to_pascal_case);

        let keys: Vec<&str> = out.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, ["ZetaKey", "AlphaKey", "MidKey"]);
    }
}
