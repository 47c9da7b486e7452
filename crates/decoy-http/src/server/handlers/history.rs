//! Call history and verification handlers.

use crate::engine::StubEngine;
use crate::server::types::{
    build_response, collect_body, error_response, json_response, FailedRequestsResponse,
    HistoryResponse, VerifyRequest, VerifyResponse,
};
use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::{Request, Response, StatusCode};

/// GET /history - Recorded exchanges, oldest first
pub fn handle_get(engine: &StubEngine) -> Response<Full<Bytes>> {
    json_response(
        StatusCode::OK,
        &HistoryResponse {
            exchanges: engine.history(),
        },
    )
}

/// DELETE /history - Clear exchanges, failed requests and counters
pub fn handle_clear(engine: &StubEngine) -> Response<Full<Bytes>> {
    engine.clear_history();
    build_response(StatusCode::NO_CONTENT, Bytes::new())
}

/// GET /failed-requests - Requests no priming could serve
pub fn handle_failed_requests(engine: &StubEngine) -> Response<Full<Bytes>> {
    json_response(
        StatusCode::OK,
        &FailedRequestsResponse {
            requests: engine.failed_requests(),
        },
    )
}

/// POST /verify - Check how often a primed pattern was served
///
/// 200 when the count satisfies the criteria, 417 otherwise.
pub async fn handle_verify(req: Request<Incoming>, engine: &StubEngine) -> Response<Full<Bytes>> {
    let body = match collect_body(req).await {
        Ok(b) => b,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, &e),
    };

    let verify: VerifyRequest = match serde_json::from_slice(&body) {
        Ok(v) => v,
        Err(e) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                &format!("Invalid verification JSON: {e}"),
            )
        }
    };

    match engine.verify(&verify.request, &verify.criteria) {
        Ok(()) => json_response(
            StatusCode::OK,
            &VerifyResponse {
                verified: true,
                count: engine.invocation_count(&verify.request),
                criteria: verify.criteria.to_string(),
            },
        ),
        Err(e) => error_response(StatusCode::EXPECTATION_FAILED, &e.to_string()),
    }
}
