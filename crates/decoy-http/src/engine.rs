//! Stub engine: the operations the HTTP layer drives.
//!
//! `StubEngine` ties together the priming store, the call history and the
//! baseline the store is reset to. It is synchronous and `Sync`; the server
//! shares one instance across connections behind an `Arc`.

use crate::history::{CallHistory, Exchange};
use crate::metrics;
use crate::priming::{
    Baseline, DefaultResponse, PrimingDefinition, PrimingError, PrimingSnapshot, PrimingStore,
};
use crate::request::{IncomingRequest, RequestPattern};
use crate::response::Response;
use crate::verification::{verify, VerificationCriteria, VerificationError};
use std::sync::Arc;
use tracing::{info, warn};

pub const DEFAULT_HISTORY_CAPACITY: usize = 1000;

/// Construction-time settings.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Exchanges and failed requests retained
    pub history_capacity: usize,
    /// Primings restored by every reset
    pub baseline: Baseline,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            baseline: Baseline::default(),
        }
    }
}

pub struct StubEngine {
    store: PrimingStore,
    history: Arc<CallHistory>,
    baseline: Baseline,
}

impl StubEngine {
    /// Create an engine already seeded with the baseline.
    pub fn new(config: EngineConfig) -> Self {
        let history = Arc::new(CallHistory::new(config.history_capacity));
        let store = PrimingStore::new(Arc::clone(&history));
        store.reset(&config.baseline);
        Self {
            store,
            history,
            baseline: config.baseline,
        }
    }

    /// Resolve an already-adapted request.
    pub fn resolve(&self, actual: &RequestPattern) -> Result<Exchange, PrimingError> {
        self.store.resolve(actual)
    }

    /// Resolve a request straight from the transport, classifying its body.
    ///
    /// A body that cannot be classified is treated as unmatched: it is recorded
    /// as a failed request and `PrimingError::MalformedBody` is returned.
    pub fn resolve_incoming(&self, incoming: &IncomingRequest) -> Result<Exchange, PrimingError> {
        match incoming.to_pattern() {
            Ok(actual) => self.store.resolve(&actual),
            Err(source) => {
                let request = incoming.to_pattern_lossy();
                warn!("Malformed body for {}: {}", request, source);
                self.history.record_failure(request.clone());
                metrics::record_request("malformed");
                Err(PrimingError::MalformedBody { request, source })
            }
        }
    }

    pub fn add_priming(&self, pattern: RequestPattern, response: Response) {
        self.store.add(pattern, response);
    }

    /// Queue several responses for one pattern, served in the given order.
    pub fn add_primings(&self, pattern: RequestPattern, responses: Vec<Response>) {
        self.store.add_all(pattern, responses);
    }

    pub fn add_definition(&self, definition: PrimingDefinition) {
        self.store.add_all(definition.request, definition.responses);
    }

    pub fn add_default_priming(&self, pattern: RequestPattern, default: impl Into<DefaultResponse>) {
        self.store.add_default(pattern, default.into());
    }

    pub fn list_current_priming(&self) -> Vec<PrimingSnapshot> {
        self.store.list()
    }

    /// Recorded exchanges, oldest first.
    pub fn history(&self) -> Vec<Exchange> {
        self.history.values()
    }

    /// Requests no priming could serve, oldest first.
    pub fn failed_requests(&self) -> Vec<RequestPattern> {
        self.history.failed_requests()
    }

    /// How many times `pattern` served a response since the last clear.
    pub fn invocation_count(&self, pattern: &RequestPattern) -> u64 {
        self.history.count(pattern)
    }

    /// Check the invocation count of `pattern` against `criteria`.
    ///
    /// `pattern` is looked up structurally, so it must equal the primed
    /// pattern, not an actual request that matched it.
    pub fn verify(
        &self,
        pattern: &RequestPattern,
        criteria: &VerificationCriteria,
    ) -> Result<(), VerificationError> {
        let result = verify(criteria, self.history.count(pattern));
        metrics::record_verification(result.is_ok());
        if let Err(e) = &result {
            info!("Verification failed for {}: {}", pattern, e);
        }
        result
    }

    /// Forget exchanges, failed requests and counters. Primings stay.
    pub fn clear_history(&self) {
        self.history.clear();
    }

    /// Restore the baseline primings and clear the history.
    pub fn reset(&self) {
        self.store.reset(&self.baseline);
        self.history.clear();
        info!(
            "Reset to baseline ({} priming(s), {} default(s))",
            self.baseline.primings.len(),
            self.baseline.defaults.len()
        );
    }

    pub fn baseline(&self) -> &Baseline {
        &self.baseline
    }

    pub fn history_capacity(&self) -> usize {
        self.history.capacity()
    }
}

impl Default for StubEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::{BodyError, BodyKind, BodyValue};
    use serde_json::json;

    #[test]
    fn test_greet_scenario() {
        let engine = StubEngine::default();
        let pattern = RequestPattern::get("/greet");
        engine.add_priming(
            pattern.clone(),
            Response::ok().with_body(BodyValue::json(json!({"msg": "hi"}))),
        );

        let exchange = engine.resolve(&RequestPattern::get("/greet")).unwrap();
        assert_eq!(exchange.response.status, 200);
        assert_eq!(
            exchange.response.body.map(|b| b.to_json()),
            Some(json!({"msg": "hi"}))
        );

        let err = engine.resolve(&RequestPattern::get("/greet")).unwrap_err();
        assert!(matches!(err, PrimingError::NotFound { .. }));

        assert!(engine
            .verify(&pattern, &VerificationCriteria::equal_to(1))
            .is_ok());
        let err = engine
            .verify(&pattern, &VerificationCriteria::equal_to(2))
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("equal to 2"));
        assert!(message.contains('1'));
    }

    #[test]
    fn test_resolve_incoming_classifies_body() {
        let engine = StubEngine::default();
        engine.add_priming(
            RequestPattern::post("/echo").with_body(BodyValue::json(json!({"n": 1}))),
            Response::new(201),
        );

        let incoming = IncomingRequest::new("POST", "/echo")
            .with_header("Content-Type", "application/json")
            .with_body(r#"{"n": 1.00}"#);
        let exchange = engine.resolve_incoming(&incoming).unwrap();
        assert_eq!(exchange.response.status, 201);
        assert_eq!(exchange.request.headers["content-type"], "application/json");
    }

    #[test]
    fn test_malformed_body_is_a_failed_request() {
        let engine = StubEngine::default();
        engine.add_priming(RequestPattern::post("/echo"), Response::ok());

        let incoming = IncomingRequest::new("POST", "/echo").with_body("{\"n\": }");
        let err = engine.resolve_incoming(&incoming).unwrap_err();
        assert!(matches!(err, PrimingError::MalformedBody { .. }));

        let failed = engine.failed_requests();
        assert_eq!(failed.len(), 1);
        assert_eq!(
            failed[0].body.as_ref().map(BodyValue::kind),
            Some(BodyKind::Literal)
        );
        // The priming was not consumed
        assert_eq!(engine.list_current_priming().len(), 1);
    }

    #[test]
    fn test_method_and_path_priming_ignores_query_string() {
        let engine = StubEngine::default();
        engine.add_priming(RequestPattern::get("/greet"), Response::ok());

        let incoming = IncomingRequest::new("GET", "/greet").with_query(Some("lang=en"));
        let exchange = engine.resolve_incoming(&incoming).unwrap();
        assert_eq!(exchange.response.status, 200);
        assert_eq!(exchange.request.query_params["lang"], vec!["en".to_string()]);
        assert_eq!(engine.invocation_count(&RequestPattern::get("/greet")), 1);
    }

    #[test]
    fn test_non_utf8_body_is_a_failed_request() {
        let engine = StubEngine::default();
        engine.add_priming(
            RequestPattern::post("/upload").with_body(BodyValue::literal(".*")),
            Response::new(201),
        );

        let incoming = IncomingRequest::new("POST", "/upload").with_body(vec![0xc3, 0x28]);
        let err = engine.resolve_incoming(&incoming).unwrap_err();
        assert!(matches!(
            err,
            PrimingError::MalformedBody {
                source: BodyError::InvalidUtf8(_),
                ..
            }
        ));
        assert_eq!(engine.failed_requests().len(), 1);
        assert_eq!(engine.list_current_priming().len(), 1);
    }

    #[test]
    fn test_reset_restores_baseline_and_clears_history() {
        let baseline = Baseline::new().with_priming(RequestPattern::get("/ping"), Response::ok());
        let engine = StubEngine::new(EngineConfig {
            history_capacity: 10,
            baseline,
        });
        assert_eq!(engine.list_current_priming().len(), 1);

        engine.resolve(&RequestPattern::get("/ping")).unwrap();
        engine.add_priming(RequestPattern::get("/extra"), Response::ok());
        assert!(engine.list_current_priming().iter().all(|s| s.request.path == "/extra"));

        engine.reset();
        let paths: Vec<String> = engine
            .list_current_priming()
            .into_iter()
            .map(|s| s.request.path)
            .collect();
        assert_eq!(paths, vec!["/ping".to_string()]);
        assert!(engine.history().is_empty());
        assert_eq!(engine.invocation_count(&RequestPattern::get("/ping")), 0);
    }

    #[test]
    fn test_clear_history_keeps_primings() {
        let engine = StubEngine::default();
        let pattern = RequestPattern::get("/kept");
        engine.add_default_priming(pattern.clone(), Response::ok());
        engine.resolve(&pattern).unwrap();
        engine.resolve(&RequestPattern::get("/nope")).unwrap_err();

        engine.clear_history();
        assert!(engine.history().is_empty());
        assert!(engine.failed_requests().is_empty());
        assert_eq!(engine.invocation_count(&pattern), 0);
        assert_eq!(engine.list_current_priming().len(), 1);
    }

    #[test]
    fn test_add_primings_preserves_order() {
        let engine = StubEngine::default();
        let pattern = RequestPattern::get("/seq");
        engine.add_primings(
            pattern.clone(),
            vec![Response::new(200), Response::new(202), Response::new(204)],
        );

        let statuses: Vec<u16> = (0..3)
            .filter_map(|_| engine.resolve(&pattern).ok())
            .map(|e| e.response.status)
            .collect();
        assert_eq!(statuses, vec![200, 202, 204]);
        assert_eq!(engine.invocation_count(&pattern), 3);
        assert!(engine
            .verify(&pattern, &VerificationCriteria::between(2, 4))
            .is_ok());
    }

    #[test]
    fn test_history_capacity_is_respected() {
        let engine = StubEngine::new(EngineConfig {
            history_capacity: 2,
            baseline: Baseline::default(),
        });
        let pattern = RequestPattern::get("/many");
        engine.add_default_priming(pattern.clone(), Response::ok());
        for _ in 0..5 {
            engine.resolve(&pattern).unwrap();
        }
        assert_eq!(engine.history().len(), 2);
        assert_eq!(engine.history_capacity(), 2);
        assert_eq!(engine.invocation_count(&pattern), 5);
    }
}
