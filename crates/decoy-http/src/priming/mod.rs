//! Priming: registered request patterns and the responses they dispense.
//!
//! # Module Structure
//!
//! - `queue` - `DefaultingQueue` and `DefaultResponse` (static or computed fallback)
//! - `store` - `PrimingStore`, the concurrent pattern registry that resolves calls
//! - `types` - Priming definitions, baseline, snapshots and `PrimingError`

mod queue;
mod store;
mod types;

pub use queue::{DefaultResponse, DefaultingQueue, ResponseProducer};
pub use store::PrimingStore;
pub use types::{Baseline, DefaultPrimingDefinition, PrimingDefinition, PrimingError, PrimingSnapshot};
