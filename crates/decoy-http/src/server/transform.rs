//! Response transformation for templated primings.
//!
//! Templated responses have `${request.*}` placeholders in their body
//! substituted from the exchange's request:
//!
//! - `${request.path}` - The request path
//! - `${request.method}` - The HTTP method
//! - `${request.query.<name>}` - First value of a query parameter
//! - `${request.headers.<name>}` - Header value (case-insensitive)
//! - `${request.body}` - The request body as sent

use crate::body::BodyValue;
use crate::history::Exchange;
use crate::request::RequestPattern;
use crate::response::Response;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Turns the resolved exchange into the response actually written.
///
/// Only invoked for responses primed with `templated: true`.
pub trait ResponseTransformer: Send + Sync {
    fn transform(&self, exchange: &Exchange) -> Response;
}

/// Serves the primed response unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassThroughTransformer;

impl ResponseTransformer for PassThroughTransformer {
    fn transform(&self, exchange: &Exchange) -> Response {
        exchange.response.clone()
    }
}

/// Substitutes `${request.*}` placeholders in the response body.
///
/// Inside JSON bodies only string leaves are rewritten, so the structure
/// and the variant of the body are preserved.
#[derive(Debug, Default, Clone, Copy)]
pub struct RequestTemplateTransformer;

static TEMPLATE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\{request\.([a-zA-Z_][a-zA-Z0-9_]*(?:\.[a-zA-Z_][a-zA-Z0-9_-]*)?)\}")
        .expect("template regex is valid")
});

impl ResponseTransformer for RequestTemplateTransformer {
    fn transform(&self, exchange: &Exchange) -> Response {
        let mut response = exchange.response.clone();
        let request = &exchange.request;
        response.body = response.body.map(|body| match body {
            BodyValue::Literal(s) => BodyValue::Literal(render(&s, request)),
            BodyValue::PlainString(s) => BodyValue::PlainString(render(&s, request)),
            BodyValue::Object(map) => BodyValue::Object(
                map.into_iter()
                    .map(|(key, value)| (key, render_json(value, request)))
                    .collect(),
            ),
            BodyValue::Array(items) => BodyValue::Array(
                items
                    .into_iter()
                    .map(|value| render_json(value, request))
                    .collect(),
            ),
        });
        response
    }
}

fn render_json(value: Value, request: &RequestPattern) -> Value {
    match value {
        Value::String(s) => Value::String(render(&s, request)),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| render_json(item, request))
                .collect(),
        ),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key, render_json(value, request)))
                .collect(),
        ),
        other => other,
    }
}

fn render(template: &str, request: &RequestPattern) -> String {
    if !template.contains("${") {
        return template.to_string();
    }
    TEMPLATE_REGEX
        .replace_all(template, |caps: &regex::Captures| {
            lookup(request, &caps[1]).unwrap_or_default()
        })
        .into_owned()
}

/// Resolve a dotted variable such as `query.name` against the request.
fn lookup(request: &RequestPattern, variable: &str) -> Option<String> {
    let parts: Vec<&str> = variable.splitn(2, '.').collect();
    match parts.as_slice() {
        ["path"] => Some(request.path.clone()),
        ["method"] => Some(request.method.clone()),
        ["body"] => Some(
            request
                .body
                .as_ref()
                .map(BodyValue::to_raw)
                .unwrap_or_default(),
        ),
        ["query", name] => request
            .query_params
            .get(*name)
            .and_then(|values| values.first().cloned()),
        ["headers", name] => request
            .headers
            .iter()
            .find(|(header, _)| header.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.clone()),
        _ => None,
    }
}
