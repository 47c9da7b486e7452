//! Stub traffic: adapt the live request, resolve it, write the primed response.

use super::state::ServerState;
use super::types::{build_response_with_headers, collect_body, error_response};
use crate::metrics;
use crate::request::IncomingRequest;
use crate::response::Response as PrimedResponse;
use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::{Request, Response, StatusCode};
use tracing::debug;

/// Handle a request that is not addressed to the admin API
pub async fn handle_stub_request(
    req: Request<Incoming>,
    state: &ServerState,
) -> Response<Full<Bytes>> {
    let mut incoming = IncomingRequest::new(req.method().as_str(), req.uri().path())
        .with_query(req.uri().query());
    // Header bytes outside UTF-8 are replaced with U+FFFD
    for (name, value) in req.headers() {
        incoming = incoming.with_header(name.as_str(), String::from_utf8_lossy(value.as_bytes()));
    }

    let body = match collect_body(req).await {
        Ok(b) => b,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, &e),
    };
    if !body.is_empty() {
        incoming = incoming.with_body(body.to_vec());
    }

    let exchange = match state.engine.resolve_incoming(&incoming) {
        Ok(exchange) => exchange,
        Err(e) => return error_response(StatusCode::NOT_FOUND, &e.to_string()),
    };

    let primed = if exchange.response.templated {
        state.transformer.transform(&exchange)
    } else {
        exchange.response
    };

    if let Some(delay) = primed.delay {
        let delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        debug!("Delaying response by {}ms", delay_ms);
        metrics::record_response_delay(primed.status, delay_ms);
        tokio::time::sleep(delay).await;
    }

    to_http_response(&primed)
}

/// Render a primed response. A body without an explicit content type gets
/// one derived from its variant.
fn to_http_response(primed: &PrimedResponse) -> Response<Full<Bytes>> {
    let status = match StatusCode::from_u16(primed.status) {
        Ok(status) => status,
        Err(_) => {
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &format!("Primed status {} is not a valid HTTP status", primed.status),
            )
        }
    };

    let mut headers: Vec<(String, String)> = primed
        .headers
        .iter()
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect();

    let body = match &primed.body {
        Some(body) => {
            let has_content_type = headers
                .iter()
                .any(|(name, _)| name.eq_ignore_ascii_case("content-type"));
            if !has_content_type {
                headers.push(("Content-Type".to_string(), body.content_type().to_string()));
            }
            body.to_raw()
        }
        None => String::new(),
    };

    build_response_with_headers(status, headers, body)
}
