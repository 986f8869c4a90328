//! Lenient request field decoding.
//!
//! Browser forms post every value as a JSON string (`"user_id": "3"`,
//! `"route_id": ""`). Numeric request fields accept either a JSON number or
//! a numeric string; optional ones read a blank string as absent.

use serde::de::{self, Deserializer};
use serde::Deserialize;
use std::fmt::Display;
use std::str::FromStr;

#[derive(Deserialize)]
#[serde(untagged)]
enum NumOrText<T> {
    Num(T),
    Text(String),
}

fn parse_text<T, E>(raw: &str) -> Result<T, E>
where
    T: FromStr,
    T::Err: Display,
    E: de::Error,
{
    raw.trim()
        .parse()
        .map_err(|e| E::custom(format!("{:?} is not a number: {}", raw, e)))
}

fn required<'de, T, D>(deserializer: D) -> Result<T, D::Error>
where
    T: FromStr + Deserialize<'de>,
    T::Err: Display,
    D: Deserializer<'de>,
{
    match NumOrText::<T>::deserialize(deserializer)? {
        NumOrText::Num(n) => Ok(n),
        NumOrText::Text(s) => parse_text(&s),
    }
}

fn optional<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: FromStr + Deserialize<'de>,
    T::Err: Display,
    D: Deserializer<'de>,
{
    match Option::<NumOrText<T>>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumOrText::Num(n)) => Ok(Some(n)),
        Some(NumOrText::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(NumOrText::Text(s)) => parse_text(&s).map(Some),
    }
}

pub(crate) fn int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    required(deserializer)
}

pub(crate) fn opt_int<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<i64>, D::Error> {
    optional(deserializer)
}

pub(crate) fn opt_float<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<f64>, D::Error> {
    optional(deserializer)
}

/// `""` and whitespace read as absent.
pub(crate) fn opt_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.filter(|s| !s.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Form {
        #[serde(deserialize_with = "super::int")]
        id: i64,
        #[serde(default, deserialize_with = "super::opt_int")]
        parent: Option<i64>,
        #[serde(default, deserialize_with = "super::opt_float")]
        cost: Option<f64>,
        #[serde(default, deserialize_with = "super::opt_text")]
        note: Option<String>,
    }

    fn form(v: serde_json::Value) -> Result<Form, serde_json::Error> {
        serde_json::from_value(v)
    }

    #[test]
    fn numbers_and_numeric_strings_both_decode() {
        let a = form(json!({"id": 7, "parent": 3, "cost": 12.5})).unwrap();
        let b = form(json!({"id": "7", "parent": " 3 ", "cost": "12.5"})).unwrap();
        assert_eq!((a.id, a.parent, a.cost), (7, Some(3), Some(12.5)));
        assert_eq!((b.id, b.parent, b.cost), (7, Some(3), Some(12.5)));
        let c = form(json!({"id": 1, "cost": 40})).unwrap();
        assert_eq!(c.cost, Some(40.0));
    }

    #[test]
    fn blank_and_missing_optionals_are_none() {
        let f = form(json!({"id": "1", "parent": "", "cost": null, "note": "  "})).unwrap();
        assert_eq!(f.parent, None);
        assert_eq!(f.cost, None);
        assert_eq!(f.note, None);
        let g = form(json!({"id": 1})).unwrap();
        assert!(g.parent.is_none() && g.cost.is_none() && g.note.is_none());
    }

    #[test]
    fn non_numeric_text_is_rejected() {
        assert!(form(json!({"id": "abc"})).is_err());
        assert!(form(json!({"id": ""})).is_err());
        assert!(form(json!({"id": 1, "parent": "x1"})).is_err());
        let err = form(json!({"id": "abc"})).unwrap_err().to_string();
        assert!(err.contains("not a number"), "{err}");
    }
}
