//! Type definitions for priming: wire definitions, baseline, snapshots and errors.

use super::queue::DefaultResponse;
use crate::body::BodyError;
use crate::request::RequestPattern;
use crate::response::Response;
use serde::{Deserialize, Serialize};

// ============================================================================
// Error Types
// ============================================================================

/// Errors raised while priming or resolving requests
#[derive(Debug, thiserror::Error)]
pub enum PrimingError {
    #[error("No priming found for {request}")]
    NotFound { request: RequestPattern },
    #[error("Malformed request body for {request}: {source}")]
    MalformedBody {
        request: RequestPattern,
        #[source]
        source: BodyError,
    },
    #[error("Serialization failed: {0}")]
    Serialization(String),
}

impl PrimingError {
    /// The request that could not be served, if any.
    pub fn request(&self) -> Option<&RequestPattern> {
        match self {
            PrimingError::NotFound { request } | PrimingError::MalformedBody { request, .. } => {
                Some(request)
            }
            PrimingError::Serialization(_) => None,
        }
    }
}

impl From<serde_json::Error> for PrimingError {
    fn from(e: serde_json::Error) -> Self {
        PrimingError::Serialization(e.to_string())
    }
}

// ============================================================================
// Wire Definitions
// ============================================================================

/// A pattern with the responses to serve, in order.
///
/// Accepts either `"responses": [...]` or a single `"response": {...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimingDefinition {
    pub request: RequestPattern,
    #[serde(alias = "response", deserialize_with = "one_or_many")]
    pub responses: Vec<Response>,
}

impl PrimingDefinition {
    pub fn new(request: RequestPattern, responses: Vec<Response>) -> Self {
        Self { request, responses }
    }
}

/// A pattern with a static default response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultPrimingDefinition {
    pub request: RequestPattern,
    pub response: Response,
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<Response>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<_, _>>()
            .map_err(D::Error::custom),
        single => serde_json::from_value(single)
            .map(|response| vec![response])
            .map_err(D::Error::custom),
    }
}

// ============================================================================
// Baseline
// ============================================================================

/// Primings the store is seeded with on construction and on every reset.
#[derive(Debug, Clone, Default)]
pub struct Baseline {
    pub primings: Vec<PrimingDefinition>,
    pub defaults: Vec<(RequestPattern, DefaultResponse)>,
}

impl Baseline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_priming(mut self, request: RequestPattern, response: Response) -> Self {
        self.primings
            .push(PrimingDefinition::new(request, vec![response]));
        self
    }

    pub fn with_primings(mut self, definitions: impl IntoIterator<Item = PrimingDefinition>) -> Self {
        self.primings.extend(definitions);
        self
    }

    pub fn with_default(mut self, request: RequestPattern, default: DefaultResponse) -> Self {
        self.defaults.push((request, default));
        self
    }

    pub fn with_defaults(
        mut self,
        definitions: impl IntoIterator<Item = DefaultPrimingDefinition>,
    ) -> Self {
        self.defaults.extend(
            definitions
                .into_iter()
                .map(|d| (d.request, DefaultResponse::Static(d.response))),
        );
        self
    }

    pub fn is_empty(&self) -> bool {
        self.primings.is_empty() && self.defaults.is_empty()
    }
}

// ============================================================================
// Snapshots
// ============================================================================

/// Point-in-time copy of one live priming, for introspection.
#[derive(Debug, Clone, Serialize)]
pub struct PrimingSnapshot {
    pub request: RequestPattern,
    pub responses: Vec<Response>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<DefaultResponse>,
}

impl PrimingSnapshot {
    /// Render as JSON. Fails when the snapshot holds a dynamic default.
    pub fn to_json(&self) -> Result<serde_json::Value, PrimingError> {
        Ok(serde_json::to_value(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_definition_accepts_single_response() {
        let definition: PrimingDefinition = serde_json::from_value(json!({
            "request": {"method": "GET", "path": "/greet"},
            "response": {"status": 200}
        }))
        .unwrap();
        assert_eq!(definition.responses, vec![Response::ok()]);
    }

    #[test]
    fn test_definition_accepts_response_list() {
        let definition: PrimingDefinition = serde_json::from_str(
            r#"{
                "request": {"method": "GET", "path": "/greet"},
                "responses": [{"status": 200}, {"status": "503"}]
            }"#,
        )
        .unwrap();
        let statuses: Vec<u16> = definition.responses.iter().map(|r| r.status).collect();
        assert_eq!(statuses, vec![200, 503]);
    }

    #[test]
    fn test_snapshot_with_dynamic_default_fails_to_render() {
        let snapshot = PrimingSnapshot {
            request: RequestPattern::get("/flaky"),
            responses: vec![],
            default: Some(DefaultResponse::dynamic(Response::ok)),
        };
        assert!(matches!(
            snapshot.to_json(),
            Err(PrimingError::Serialization(_))
        ));
    }

    #[test]
    fn test_not_found_message() {
        let err = PrimingError::NotFound {
            request: RequestPattern::get("/missing"),
        };
        assert_eq!(err.to_string(), "No priming found for GET /missing");
        assert_eq!(err.request().map(|r| r.path.as_str()), Some("/missing"));
    }
}
