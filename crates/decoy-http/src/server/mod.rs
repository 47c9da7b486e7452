//! HTTP transport for the stub engine.
//!
//! One listener serves both kinds of traffic. Requests under the admin
//! prefix (default `/__admin`) manage primings, history and verification;
//! every other request is resolved against the primings.
//!
//! # Module Structure
//!
//! - `server` - `StubServer`, the hyper accept loop
//! - `router` - Admin route parsing and dispatch
//! - `handlers` - Admin endpoint handlers (primings, history, system)
//! - `stub_handler` - Request adaptation and primed response rendering
//! - `transform` - `ResponseTransformer` hook for templated responses
//! - `state` - State shared across connections
//! - `types` - Admin payloads and response helpers

mod handlers;
mod router;
mod server;
mod state;
mod stub_handler;
mod transform;
mod types;

pub use server::StubServer;
pub use state::ServerState;
pub use transform::{PassThroughTransformer, RequestTemplateTransformer, ResponseTransformer};
pub use types::{ErrorDetail, ErrorResponse, VerifyRequest};
