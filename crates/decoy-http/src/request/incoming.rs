//! Transport-neutral view of a live HTTP request.

use super::pattern::RequestPattern;
use super::query::parse_query_string;
use crate::body::{parse_body, BodyError, BodyValue};
use std::collections::BTreeMap;

/// A request as handed over by the HTTP layer, body still unparsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingRequest {
    pub method: String,
    pub path: String,
    /// Header names are lower-cased
    pub headers: BTreeMap<String, String>,
    pub query_params: BTreeMap<String, Vec<String>>,
    /// Raw body bytes, decoded when the body is classified
    pub body: Option<Vec<u8>>,
}

impl IncomingRequest {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            headers: BTreeMap::new(),
            query_params: BTreeMap::new(),
            body: None,
        }
    }

    /// Add a header. Repeated names are folded into one comma-separated value.
    pub fn with_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        let value = value.into();
        self.headers
            .entry(name.as_ref().to_ascii_lowercase())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert(value);
        self
    }

    pub fn with_query(mut self, query: Option<&str>) -> Self {
        self.query_params = parse_query_string(query);
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Convert into an actual-value pattern, classifying the body.
    pub fn to_pattern(&self) -> Result<RequestPattern, BodyError> {
        let body = match &self.body {
            Some(raw) => parse_body(std::str::from_utf8(raw)?)?,
            None => None,
        };
        Ok(self.pattern_with_body(body))
    }

    /// Like [`to_pattern`](Self::to_pattern) but keeps an unparseable body as a
    /// literal, with invalid UTF-8 replaced. Used to report requests whose
    /// body was malformed.
    pub fn to_pattern_lossy(&self) -> RequestPattern {
        let body = self
            .body
            .as_deref()
            .filter(|raw| !raw.is_empty())
            .map(|raw| BodyValue::literal(String::from_utf8_lossy(raw)));
        self.pattern_with_body(body)
    }

    fn pattern_with_body(&self, body: Option<BodyValue>) -> RequestPattern {
        RequestPattern {
            method: self.method.clone(),
            path: self.path.clone(),
            headers: self.headers.clone(),
            query_params: self.query_params.clone(),
            body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::BodyKind;

    #[test]
    fn test_to_pattern() {
        let incoming = IncomingRequest::new("POST", "/orders")
            .with_header("Content-Type", "application/json")
            .with_query(Some("dry_run=true"))
            .with_body(r#"{"item": "book"}"#);

        let pattern = incoming.to_pattern().unwrap();
        assert_eq!(pattern.method, "POST");
        assert_eq!(pattern.headers.get("content-type").map(String::as_str), Some("application/json"));
        assert_eq!(pattern.query_params["dry_run"], vec!["true".to_string()]);
        assert_eq!(pattern.body.map(|b| b.kind()), Some(BodyKind::Object));
    }

    #[test]
    fn test_empty_body_is_absent() {
        let pattern = IncomingRequest::new("GET", "/").with_body("").to_pattern().unwrap();
        assert!(pattern.body.is_none());
    }

    #[test]
    fn test_malformed_body() {
        let incoming = IncomingRequest::new("POST", "/").with_body("[1, 2,]");
        assert!(incoming.to_pattern().is_err());
        assert_eq!(
            incoming.to_pattern_lossy().body,
            Some(BodyValue::literal("[1, 2,]"))
        );
    }

    #[test]
    fn test_non_utf8_body_is_malformed() {
        let incoming = IncomingRequest::new("POST", "/").with_body(vec![b'o', b'k', 0xff]);
        let err = incoming.to_pattern().unwrap_err();
        assert!(matches!(err, BodyError::InvalidUtf8(_)));
        assert_eq!(
            incoming.to_pattern_lossy().body,
            Some(BodyValue::literal("ok\u{fffd}"))
        );
    }

    #[test]
    fn test_repeated_headers_are_joined() {
        let incoming = IncomingRequest::new("GET", "/")
            .with_header("Accept", "text/html")
            .with_header("accept", "application/json");
        assert_eq!(incoming.headers["accept"], "text/html, application/json");
    }
}
