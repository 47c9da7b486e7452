//! Request pattern value and its matching predicate.

use crate::body::BodyValue;
use crate::predicate::{body_matches, string_matches};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Primed request descriptor, also used to represent an actual call.
///
/// Equality and hashing are structural over every field, so a pattern can key
/// the priming store and the invocation counters. The `with_*` combinators
/// consume the value and return a new one; a pattern is never shared mutably.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestPattern {
    pub method: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub query_params: BTreeMap<String, Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<BodyValue>,
}

impl RequestPattern {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            headers: BTreeMap::new(),
            query_params: BTreeMap::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new("GET", path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new("POST", path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new("PUT", path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new("DELETE", path)
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Add or replace a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Append one value to a query parameter's ordered value list.
    pub fn with_query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params
            .entry(name.into())
            .or_default()
            .push(value.into());
        self
    }

    /// Replace a query parameter's whole value list.
    pub fn with_query_values<I, V>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.query_params
            .insert(name.into(), values.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_body(mut self, body: BodyValue) -> Self {
        self.body = Some(body);
        self
    }

    pub fn without_body(mut self) -> Self {
        self.body = None;
        self
    }

    /// Whether `actual` satisfies this pattern.
    ///
    /// Method, path, headers, query parameters and body are independent
    /// conditions and all must hold.
    pub fn matches(&self, actual: &RequestPattern) -> bool {
        self.method_matches(actual)
            && self.path_matches(actual)
            && self.headers_match(actual)
            && self.query_matches(actual)
            && body_matches(self.body.as_ref(), actual.body.as_ref())
    }

    fn method_matches(&self, actual: &RequestPattern) -> bool {
        string_matches(&self.method, &actual.method)
    }

    fn path_matches(&self, actual: &RequestPattern) -> bool {
        string_matches(&self.path, &actual.path)
    }

    /// Subset match: every primed header must be present with a matching
    /// value. Header names compare case-insensitively.
    fn headers_match(&self, actual: &RequestPattern) -> bool {
        self.headers.iter().all(|(name, expected)| {
            actual
                .headers
                .iter()
                .find(|(actual_name, _)| actual_name.eq_ignore_ascii_case(name))
                .is_some_and(|(_, value)| string_matches(expected, value))
        })
    }

    /// A pattern without query params matches any query. Otherwise the key
    /// sets must be equal and each value list is compared by position.
    fn query_matches(&self, actual: &RequestPattern) -> bool {
        if self.query_params.is_empty() {
            return true;
        }
        if self.query_params.len() != actual.query_params.len() {
            return false;
        }
        self.query_params.iter().all(|(name, expected)| {
            actual.query_params.get(name).is_some_and(|values| {
                expected.len() == values.len()
                    && expected
                        .iter()
                        .zip(values)
                        .all(|(expected, value)| string_matches(expected, value))
            })
        })
    }
}

impl fmt::Display for RequestPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}
