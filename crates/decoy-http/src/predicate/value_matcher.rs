//! Recursive, type-directed comparison of JSON values.

use super::number::decimal_eq;
use super::string_matcher::string_matches;
use serde_json::{Map, Value};

/// Compare a pattern value against an actual value.
///
/// The shape of `actual` drives the comparison:
/// - string: regex-or-equality against a string pattern
/// - object: identical key sets, every value compared recursively
/// - array: same length, elements compared by position
/// - number: decimal equality (a numeric string pattern is also accepted)
/// - anything else: plain equality
///
/// `null` and an empty object are interchangeable.
pub fn values_match(pattern: &Value, actual: &Value) -> bool {
    match actual {
        Value::String(actual) => match pattern {
            Value::String(pattern) => string_matches(pattern, actual),
            _ => false,
        },
        Value::Object(actual) => match pattern {
            Value::Object(pattern) => maps_match(pattern, actual),
            Value::Null => actual.is_empty(),
            _ => false,
        },
        Value::Array(actual) => match pattern {
            Value::Array(pattern) => sequences_match(pattern, actual),
            _ => false,
        },
        Value::Number(actual) => match pattern {
            Value::Number(pattern) => decimal_eq(&pattern.to_string(), &actual.to_string()),
            Value::String(pattern) => decimal_eq(pattern, &actual.to_string()),
            _ => false,
        },
        Value::Null => match pattern {
            Value::Null => true,
            Value::Object(pattern) => pattern.is_empty(),
            _ => false,
        },
        Value::Bool(_) => pattern == actual,
    }
}

/// Key sets must be identical; values are compared with [`values_match`].
pub(crate) fn maps_match(pattern: &Map<String, Value>, actual: &Map<String, Value>) -> bool {
    if pattern.len() != actual.len() {
        return false;
    }
    pattern.iter().all(|(key, expected)| {
        actual
            .get(key)
            .is_some_and(|value| values_match(expected, value))
    })
}

/// Same length, element-wise [`values_match`]; no reordering.
pub(crate) fn sequences_match(pattern: &[Value], actual: &[Value]) -> bool {
    pattern.len() == actual.len()
        && pattern
            .iter()
            .zip(actual)
            .all(|(expected, value)| values_match(expected, value))
}
