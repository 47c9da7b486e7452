//! Decoy: an HTTP test-double server.
//!
//! Callers prime request patterns with the responses to return; incoming
//! calls are matched against those patterns, served from per-pattern
//! response queues, and recorded so that invocation counts can be verified.
//!
//! # Module Structure
//!
//! - `body` - Typed request/response payloads and the raw body classifier
//! - `predicate` - Regex-aware, type-polymorphic value matching
//! - `request` - Request patterns, incoming request adaptation, query parsing
//! - `response` - Primed response value
//! - `priming` - Defaulting queues and the concurrent priming store
//! - `history` - Bounded exchange history and invocation counters
//! - `verification` - Invocation count criteria
//! - `engine` - `StubEngine`, the operations the HTTP layer drives
//! - `server` - hyper transport and admin API
//! - `config` - YAML configuration and priming files
//! - `metrics` - Prometheus metrics

pub mod body;
pub mod config;
pub mod engine;
pub mod history;
pub mod metrics;
pub mod predicate;
pub mod priming;
pub mod request;
pub mod response;
pub mod server;
pub mod verification;

pub use engine::{EngineConfig, StubEngine};
pub use priming::{DefaultResponse, PrimingError};
pub use request::{IncomingRequest, RequestPattern};
pub use response::Response;
pub use verification::{VerificationCriteria, VerificationError};
