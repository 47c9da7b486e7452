//! Primed response value.

use crate::body::BodyValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Response served for a matched priming.
///
/// Built with the consuming `with_*` combinators; every step yields an
/// independent value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    #[serde(
        default = "default_status",
        deserialize_with = "deserialize_status_code"
    )]
    pub status: u16,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<BodyValue>,
    /// Time to wait before the response is written
    #[serde(
        default,
        rename = "delayMs",
        with = "delay_millis",
        skip_serializing_if = "Option::is_none"
    )]
    pub delay: Option<Duration>,
    /// Whether the body is a template to be rendered against the exchange
    #[serde(default, skip_serializing_if = "is_false")]
    pub templated: bool,
}

impl Response {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: BTreeMap::new(),
            body: None,
            delay: None,
            templated: false,
        }
    }

    pub fn ok() -> Self {
        Self::new(200)
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: BodyValue) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn templated(mut self, templated: bool) -> Self {
        self.templated = templated;
        self
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::ok()
    }
}

fn default_status() -> u16 {
    200
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Deserialize a status code from either a number or a string
fn deserialize_status_code<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Number(n) => n
            .as_u64()
            .and_then(|n| u16::try_from(n).ok())
            .ok_or_else(|| D::Error::custom("invalid status code number")),
        serde_json::Value::String(s) => s
            .parse::<u16>()
            .map_err(|_| D::Error::custom(format!("invalid status code string: {s}"))),
        _ => Err(D::Error::custom("status must be a number or string")),
    }
}

mod delay_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(delay: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match delay {
            Some(delay) => {
                serializer.serialize_u64(u64::try_from(delay.as_millis()).unwrap_or(u64::MAX))
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_millis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let response: Response = serde_json::from_str("{}").unwrap();
        assert_eq!(response, Response::ok());
    }

    #[test]
    fn test_status_as_string() {
        let response: Response = serde_json::from_str(r#"{"status": "404"}"#).unwrap();
        assert_eq!(response.status, 404);

        let invalid: Result<Response, _> = serde_json::from_str(r#"{"status": "nope"}"#);
        assert!(invalid.is_err());
    }

    #[test]
    fn test_delay_in_millis() {
        let response = Response::ok().with_delay(Duration::from_millis(250));
        let wire = serde_json::to_value(&response).unwrap();
        assert_eq!(wire, json!({"status": 200, "delayMs": 250}));

        let back: Response = serde_json::from_value(wire).unwrap();
        assert_eq!(back.delay, Some(Duration::from_millis(250)));
    }

    #[test]
    fn test_full_wire_form() {
        let response = Response::new(201)
            .with_header("Location", "/orders/1")
            .with_body(BodyValue::json(json!({"id": 1})))
            .templated(true);
        let wire = serde_json::to_value(&response).unwrap();
        assert_eq!(
            wire,
            json!({
                "status": 201,
                "headers": {"Location": "/orders/1"},
                "body": {"type": "object", "value": {"id": 1}},
                "templated": true
            })
        );
    }
}
