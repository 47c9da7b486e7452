//! Body matching.

use super::string_matcher::string_matches;
use super::value_matcher::{maps_match, sequences_match};
use crate::body::BodyValue;

/// Compare a primed body against an actual body.
///
/// An absent pattern body matches anything, including an absent body.
/// Otherwise the actual body must be present, of the same variant, and match
/// recursively.
pub fn body_matches(pattern: Option<&BodyValue>, actual: Option<&BodyValue>) -> bool {
    let Some(pattern) = pattern else {
        return true;
    };
    let Some(actual) = actual else {
        return false;
    };

    match (pattern, actual) {
        (BodyValue::Literal(pattern), BodyValue::Literal(actual))
        | (BodyValue::PlainString(pattern), BodyValue::PlainString(actual)) => {
            string_matches(pattern, actual)
        }
        (BodyValue::Object(pattern), BodyValue::Object(actual)) => maps_match(pattern, actual),
        (BodyValue::Array(pattern), BodyValue::Array(actual)) => sequences_match(pattern, actual),
        _ => false,
    }
}
