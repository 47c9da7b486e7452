//! Typed request and response payloads.
//!
//! A body is kept as one of four shapes so that a primed `"abc"` (a JSON
//! string) and a primed `abc` (raw text) never compare equal even though
//! their content is the same.
//!
//! # Module Structure
//!
//! - `value` - The `BodyValue` sum type, its wire representation and hashing
//! - `parser` - Classification of raw body text into a `BodyValue` and back

mod parser;
mod value;

pub use parser::{parse_body, BodyError};
pub use value::{BodyKind, BodyValue};
