//! Admin API handlers.

pub mod history;
pub mod primings;
pub mod system;
