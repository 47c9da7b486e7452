//! Call history: recent exchanges, failed requests and invocation counters.
//!
//! # Module Structure
//!
//! - `bounded` - Fixed-capacity FIFO that evicts its oldest entry on overflow
//! - `cache` - `CallHistory`, combining the FIFOs with per-pattern counters
//! - `types` - The recorded `Exchange`

mod bounded;
mod cache;
mod types;

pub use bounded::BoundedFifo;
pub use cache::CallHistory;
pub use types::Exchange;
