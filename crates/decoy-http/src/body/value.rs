//! Body value model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Shape tag of a [`BodyValue`], also used as the `type` field on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BodyKind {
    Literal,
    #[serde(rename = "string")]
    PlainString,
    Object,
    Array,
}

impl fmt::Display for BodyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BodyKind::Literal => "literal",
            BodyKind::PlainString => "string",
            BodyKind::Object => "object",
            BodyKind::Array => "array",
        };
        f.write_str(name)
    }
}

/// Request or response payload.
///
/// Equality and hashing are structural. Object key order never matters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "BodyValueRepr", try_from = "BodyValueRepr")]
pub enum BodyValue {
    /// Raw, non-JSON text
    Literal(String),
    /// A JSON string scalar
    PlainString(String),
    /// A JSON object
    Object(Map<String, Value>),
    /// A JSON array
    Array(Vec<Value>),
}

impl BodyValue {
    pub fn literal(text: impl Into<String>) -> Self {
        BodyValue::Literal(text.into())
    }

    pub fn string(text: impl Into<String>) -> Self {
        BodyValue::PlainString(text.into())
    }

    /// Build an `Object` or `Array` body from a JSON value.
    ///
    /// String scalars become `PlainString`; any other scalar is kept as its
    /// JSON text in a `Literal`.
    pub fn json(value: Value) -> Self {
        match value {
            Value::Object(map) => BodyValue::Object(map),
            Value::Array(items) => BodyValue::Array(items),
            Value::String(s) => BodyValue::PlainString(s),
            other => BodyValue::Literal(other.to_string()),
        }
    }

    pub fn kind(&self) -> BodyKind {
        match self {
            BodyValue::Literal(_) => BodyKind::Literal,
            BodyValue::PlainString(_) => BodyKind::PlainString,
            BodyValue::Object(_) => BodyKind::Object,
            BodyValue::Array(_) => BodyKind::Array,
        }
    }

    /// Content as a JSON value (text variants become JSON strings).
    pub fn to_json(&self) -> Value {
        match self {
            BodyValue::Literal(s) | BodyValue::PlainString(s) => Value::String(s.clone()),
            BodyValue::Object(map) => Value::Object(map.clone()),
            BodyValue::Array(items) => Value::Array(items.clone()),
        }
    }

    /// Render the body as the text sent over HTTP.
    pub fn to_raw(&self) -> String {
        match self {
            BodyValue::Literal(s) => s.clone(),
            BodyValue::PlainString(s) => Value::String(s.clone()).to_string(),
            BodyValue::Object(map) => Value::Object(map.clone()).to_string(),
            BodyValue::Array(items) => Value::Array(items.clone()).to_string(),
        }
    }

    /// Content type to advertise when a primed response does not set one.
    pub fn content_type(&self) -> &'static str {
        match self {
            BodyValue::Literal(_) => "text/plain; charset=utf-8",
            _ => "application/json",
        }
    }
}

impl Hash for BodyValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind().hash(state);
        match self {
            BodyValue::Literal(s) | BodyValue::PlainString(s) => s.hash(state),
            BodyValue::Object(map) => hash_map(map, state),
            BodyValue::Array(items) => hash_items(items, state),
        }
    }
}

fn hash_items<H: Hasher>(items: &[Value], state: &mut H) {
    items.len().hash(state);
    for item in items {
        hash_json(item, state);
    }
}

// Keys are hashed in sorted order so the result is independent of map ordering.
fn hash_map<H: Hasher>(map: &Map<String, Value>, state: &mut H) {
    map.len().hash(state);
    let mut keys: Vec<&String> = map.keys().collect();
    keys.sort();
    for key in keys {
        key.hash(state);
        if let Some(value) = map.get(key) {
            hash_json(value, state);
        }
    }
}

fn hash_json<H: Hasher>(value: &Value, state: &mut H) {
    match value {
        Value::Null => 0u8.hash(state),
        Value::Bool(b) => {
            1u8.hash(state);
            b.hash(state);
        }
        Value::Number(n) => {
            2u8.hash(state);
            n.to_string().hash(state);
        }
        Value::String(s) => {
            3u8.hash(state);
            s.hash(state);
        }
        Value::Array(items) => {
            4u8.hash(state);
            hash_items(items, state);
        }
        Value::Object(map) => {
            5u8.hash(state);
            hash_map(map, state);
        }
    }
}

/// Wire form: `{"type": "object", "value": {...}}`
#[derive(Debug, Clone, Serialize, Deserialize)]
struct BodyValueRepr {
    #[serde(rename = "type")]
    kind: BodyKind,
    value: Value,
}

impl From<BodyValue> for BodyValueRepr {
    fn from(body: BodyValue) -> Self {
        let kind = body.kind();
        let value = match body {
            BodyValue::Literal(s) | BodyValue::PlainString(s) => Value::String(s),
            BodyValue::Object(map) => Value::Object(map),
            BodyValue::Array(items) => Value::Array(items),
        };
        BodyValueRepr { kind, value }
    }
}

impl TryFrom<BodyValueRepr> for BodyValue {
    type Error = String;

    fn try_from(repr: BodyValueRepr) -> Result<Self, Self::Error> {
        match (repr.kind, repr.value) {
            (BodyKind::Literal, Value::String(s)) => Ok(BodyValue::Literal(s)),
            (BodyKind::PlainString, Value::String(s)) => Ok(BodyValue::PlainString(s)),
            (BodyKind::Object, Value::Object(map)) => Ok(BodyValue::Object(map)),
            (BodyKind::Array, Value::Array(items)) => Ok(BodyValue::Array(items)),
            (kind, other) => Err(format!(
                "body of type '{kind}' cannot hold JSON value {other}"
            )),
        }
    }
}
