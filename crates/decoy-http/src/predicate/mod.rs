//! Matching engine: compares a primed pattern value against an actual value.
//!
//! All functions here are pure. A pattern string is treated as a regular
//! expression only when it contains one of `+ . * [ { ^ | $ ?`, and a regex
//! must match the whole actual string. Numbers compare by decimal value,
//! objects by identical key sets, arrays position by position.
//!
//! # Module Structure
//!
//! - `string_matcher` - Regex-or-equality for strings, with a compiled regex cache
//! - `number` - Representation-independent decimal equality
//! - `value_matcher` - Recursive comparison of JSON values
//! - `body_matcher` - Comparison of typed bodies

mod body_matcher;
mod number;
mod string_matcher;
mod value_matcher;

pub use body_matcher::body_matches;
pub use number::decimal_eq;
pub use string_matcher::{is_regex_pattern, string_matches};
pub use value_matcher::values_match;
