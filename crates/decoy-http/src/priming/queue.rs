//! Self-draining response queue with an optional fallback.

use crate::response::Response;
use serde::ser::Error as _;
use serde::{Serialize, Serializer};
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

/// Zero-argument producer bound at priming time.
pub type ResponseProducer = Arc<dyn Fn() -> Response + Send + Sync>;

/// Fallback served once a queue is drained.
///
/// `Dynamic` defaults are computed on every call. Serializing one fails, and
/// there is no `Deserialize` impl, so priming files can only carry `Static`.
#[derive(Clone)]
pub enum DefaultResponse {
    Static(Response),
    Dynamic(ResponseProducer),
}

impl DefaultResponse {
    pub fn dynamic<F>(producer: F) -> Self
    where
        F: Fn() -> Response + Send + Sync + 'static,
    {
        DefaultResponse::Dynamic(Arc::new(producer))
    }

    /// Compute the fallback. A `Dynamic` producer may return a different
    /// response on every call.
    pub fn produce(&self) -> Response {
        match self {
            DefaultResponse::Static(response) => response.clone(),
            DefaultResponse::Dynamic(producer) => producer(),
        }
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self, DefaultResponse::Dynamic(_))
    }
}

impl From<Response> for DefaultResponse {
    fn from(response: Response) -> Self {
        DefaultResponse::Static(response)
    }
}

impl fmt::Debug for DefaultResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultResponse::Static(response) => f.debug_tuple("Static").field(response).finish(),
            DefaultResponse::Dynamic(_) => f.write_str("Dynamic(<producer>)"),
        }
    }
}

impl Serialize for DefaultResponse {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            DefaultResponse::Static(response) => response.serialize(serializer),
            DefaultResponse::Dynamic(_) => Err(S::Error::custom(
                "dynamic default responses are computed and cannot be serialized",
            )),
        }
    }
}

/// FIFO of responses for one pattern plus an optional default.
///
/// Not synchronized on its own; the priming store only touches a queue while
/// holding its lock.
#[derive(Debug, Clone, Default)]
pub struct DefaultingQueue {
    responses: VecDeque<Response>,
    default: Option<DefaultResponse>,
}

impl DefaultingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dequeue the head, or fall back to the default, or nothing.
    pub fn poll(&mut self) -> Option<Response> {
        if let Some(response) = self.responses.pop_front() {
            return Some(response);
        }
        self.default.as_ref().map(DefaultResponse::produce)
    }

    pub fn add(&mut self, response: Response) {
        self.responses.push_back(response);
    }

    pub fn add_all(&mut self, responses: impl IntoIterator<Item = Response>) {
        self.responses.extend(responses);
    }

    /// Replace the default. Queued responses are untouched.
    pub fn set_default(&mut self, default: DefaultResponse) {
        self.default = Some(default);
    }

    pub fn default_response(&self) -> Option<&DefaultResponse> {
        self.default.as_ref()
    }

    /// Queued responses, excluding the default.
    pub fn size(&self) -> usize {
        self.responses.len()
    }

    /// Nothing queued and no default: the queue can never serve again.
    pub fn is_exhausted(&self) -> bool {
        self.responses.is_empty() && self.default.is_none()
    }

    pub fn responses(&self) -> impl Iterator<Item = &Response> {
        self.responses.iter()
    }

    /// Back to the just-constructed state.
    pub fn reset(&mut self) {
        self.responses.clear();
        self.default = None;
    }
}
