//! System handlers: health, metrics, reset.

use crate::engine::StubEngine;
use crate::metrics::collect_metrics;
use crate::server::types::{build_response_with_headers, json_response};
use bytes::Bytes;
use http_body_util::Full;
use hyper::{Response, StatusCode};
use serde_json::json;

/// GET /health - Health check
pub fn handle_health() -> Response<Full<Bytes>> {
    json_response(StatusCode::OK, &json!({"status": "ok"}))
}

/// GET /metrics - Prometheus metrics
pub fn handle_metrics() -> Response<Full<Bytes>> {
    build_response_with_headers(
        StatusCode::OK,
        [("Content-Type", "text/plain; version=0.0.4")],
        collect_metrics(),
    )
}

/// POST /reset - Restore the baseline primings and clear the history
pub fn handle_reset(engine: &StubEngine) -> Response<Full<Bytes>> {
    engine.reset();
    json_response(
        StatusCode::OK,
        &json!({
            "status": "reset",
            "primings": engine.list_current_priming().len()
        }),
    )
}
