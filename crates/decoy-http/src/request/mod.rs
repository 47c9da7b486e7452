//! Request patterns and incoming request adaptation.
//!
//! A `RequestPattern` is both the template a priming is registered under and
//! the value an incoming call is turned into before matching.

mod incoming;
mod pattern;
mod query;

pub use incoming::IncomingRequest;
pub use pattern::RequestPattern;
pub use query::parse_query_string;
