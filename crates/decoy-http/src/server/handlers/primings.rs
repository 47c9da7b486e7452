//! Priming management handlers.

use crate::engine::StubEngine;
use crate::priming::{DefaultPrimingDefinition, PrimingDefinition};
use crate::server::types::{collect_body, error_response, json_response, PrimingsResponse};
use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::{Request, Response, StatusCode};
use serde_json::json;
use tracing::warn;

/// GET /primings - Live primings in match order
pub fn handle_list(engine: &StubEngine) -> Response<Full<Bytes>> {
    let rendered: Result<Vec<_>, _> = engine
        .list_current_priming()
        .iter()
        .map(|snapshot| snapshot.to_json())
        .collect();
    match rendered {
        Ok(primings) => json_response(StatusCode::OK, &PrimingsResponse { primings }),
        Err(e) => {
            warn!("Failed to render primings: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string())
        }
    }
}

/// POST /primings - Add one priming definition or a list of them
pub async fn handle_add(req: Request<Incoming>, engine: &StubEngine) -> Response<Full<Bytes>> {
    let body = match collect_body(req).await {
        Ok(b) => b,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, &e),
    };

    let definitions = match parse_definitions(&body) {
        Ok(d) => d,
        Err(e) => {
            return error_response(StatusCode::BAD_REQUEST, &format!("Invalid priming JSON: {e}"))
        }
    };

    if let Some(empty) = definitions.iter().find(|d| d.responses.is_empty()) {
        return error_response(
            StatusCode::BAD_REQUEST,
            &format!("Priming for {} has no responses", empty.request),
        );
    }

    let count = definitions.len();
    for definition in definitions {
        engine.add_definition(definition);
    }
    json_response(StatusCode::CREATED, &json!({ "added": count }))
}

/// POST /primings/default - Set the default response for a pattern
pub async fn handle_add_default(
    req: Request<Incoming>,
    engine: &StubEngine,
) -> Response<Full<Bytes>> {
    let body = match collect_body(req).await {
        Ok(b) => b,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, &e),
    };

    let definition: DefaultPrimingDefinition = match serde_json::from_slice(&body) {
        Ok(d) => d,
        Err(e) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                &format!("Invalid default priming JSON: {e}"),
            )
        }
    };

    engine.add_default_priming(definition.request, definition.response);
    json_response(StatusCode::CREATED, &json!({ "added": 1 }))
}

fn parse_definitions(body: &[u8]) -> Result<Vec<PrimingDefinition>, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_slice(body)?;
    if value.is_array() {
        serde_json::from_value(value)
    } else {
        serde_json::from_value(value).map(|definition| vec![definition])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::priming::DefaultResponse;
    use crate::request::RequestPattern;

    #[test]
    fn test_parse_single_definition() {
        let definitions = parse_definitions(
            br#"{"request": {"method": "GET", "path": "/a"}, "response": {"status": 204}}"#,
        )
        .unwrap();
        assert_eq!(definitions.len(), 1);
        assert_eq!(definitions[0].responses[0].status, 204);
    }

    #[test]
    fn test_parse_definition_list() {
        let definitions = parse_definitions(
            br#"[
                {"request": {"method": "GET", "path": "/a"}, "response": {}},
                {"request": {"method": "GET", "path": "/b"}, "responses": []}
            ]"#,
        )
        .unwrap();
        assert_eq!(definitions.len(), 2);
        assert!(definitions[1].responses.is_empty());
    }

    #[test]
    fn test_list_renders_snapshots() {
        let engine = StubEngine::default();
        engine.add_priming(RequestPattern::get("/a"), crate::response::Response::ok());
        let response = handle_list(&engine);
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_list_with_dynamic_default_is_an_error() {
        let engine = StubEngine::default();
        engine.add_default_priming(
            RequestPattern::get("/dyn"),
            DefaultResponse::dynamic(crate::response::Response::ok),
        );
        let response = handle_list(&engine);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
