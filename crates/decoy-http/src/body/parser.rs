//! Raw body classification.
//!
//! Classification is purely syntactic: only the first and last non-blank
//! characters decide which shape the text is parsed as.

use super::value::{BodyKind, BodyValue};
use serde_json::{Map, Value};

/// A body that could not be classified.
#[derive(Debug, thiserror::Error)]
pub enum BodyError {
    /// Looked like JSON but failed to parse
    #[error("malformed {kind} body: {source}")]
    Malformed {
        kind: BodyKind,
        #[source]
        source: serde_json::Error,
    },
    #[error("body is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

impl BodyError {
    fn malformed(kind: BodyKind) -> impl FnOnce(serde_json::Error) -> Self {
        move |source| BodyError::Malformed { kind, source }
    }

    /// Shape the body was parsed as, if it got that far.
    pub fn kind(&self) -> Option<BodyKind> {
        match self {
            BodyError::Malformed { kind, .. } => Some(*kind),
            BodyError::InvalidUtf8(_) => None,
        }
    }
}

/// Classify raw body text.
///
/// - `{...}` parses as an object
/// - `[...]` parses as an array
/// - `"..."` parses as a JSON string
/// - anything else is kept verbatim as a literal
///
/// An empty body is absent.
pub fn parse_body(raw: &str) -> Result<Option<BodyValue>, BodyError> {
    if raw.is_empty() {
        return Ok(None);
    }

    let trimmed = raw.trim();
    let body = if is_delimited(trimmed, '{', '}') {
        let map: Map<String, Value> = serde_json::from_str(trimmed)
            .map_err(BodyError::malformed(BodyKind::Object))?;
        BodyValue::Object(map)
    } else if is_delimited(trimmed, '[', ']') {
        let items: Vec<Value> = serde_json::from_str(trimmed)
            .map_err(BodyError::malformed(BodyKind::Array))?;
        BodyValue::Array(items)
    } else if trimmed.len() >= 2 && is_delimited(trimmed, '"', '"') {
        let text: String = serde_json::from_str(trimmed)
            .map_err(BodyError::malformed(BodyKind::PlainString))?;
        BodyValue::PlainString(text)
    } else {
        BodyValue::Literal(raw.to_string())
    };

    Ok(Some(body))
}

fn is_delimited(text: &str, open: char, close: char) -> bool {
    text.starts_with(open) && text.ends_with(close)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_classify_object() {
        let body = parse_body(r#" {"name": "alice", "age": 30} "#).unwrap();
        assert_eq!(body, Some(BodyValue::json(json!({"name": "alice", "age": 30}))));
    }

    #[test]
    fn test_classify_array() {
        let body = parse_body("[1, 2, 3]").unwrap();
        assert_eq!(body.map(|b| b.kind()), Some(BodyKind::Array));
    }

    #[test]
    fn test_classify_plain_string() {
        let body = parse_body(r#""hello \"world\"""#).unwrap();
        assert_eq!(body, Some(BodyValue::string("hello \"world\"")));
    }

    #[test]
    fn test_classify_literal() {
        assert_eq!(
            parse_body("name=alice&age=30").unwrap(),
            Some(BodyValue::literal("name=alice&age=30"))
        );
        // A lone quote is not a JSON string
        assert_eq!(parse_body("\"").unwrap(), Some(BodyValue::literal("\"")));
    }

    #[test]
    fn test_empty_body_is_absent() {
        assert_eq!(parse_body("").unwrap(), None);
    }

    #[test]
    fn test_malformed_object() {
        let err = parse_body("{not json}").unwrap_err();
        assert_eq!(err.kind(), Some(BodyKind::Object));
        assert!(err.to_string().starts_with("malformed object body"));
    }

    #[test]
    fn test_large_numbers_keep_their_digits() {
        let body = parse_body(r#"{"amount": 12345678901234567890.000000001}"#)
            .unwrap()
            .unwrap();
        assert_eq!(body.to_raw(), r#"{"amount":12345678901234567890.000000001}"#);
    }

    fn json_leaf() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| json!(n)),
            "[a-z0-9 ]{0,8}".prop_map(Value::String),
        ]
    }

    fn json_tree() -> impl Strategy<Value = Value> {
        json_leaf().prop_recursive(3, 24, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                prop::collection::btree_map("[a-z]{1,5}", inner, 0..4)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        })
    }

    proptest! {
        #[test]
        fn test_format_then_parse_preserves_body(tree in json_tree(), text in "[a-z =&]{1,16}") {
            let bodies = [
                BodyValue::json(json!({"root": tree.clone()})),
                BodyValue::json(json!([tree])),
                BodyValue::string(text.clone()),
                BodyValue::literal(text),
            ];
            for body in bodies {
                let parsed = parse_body(&body.to_raw()).unwrap();
                prop_assert_eq!(parsed, Some(body));
            }
        }
    }
}
