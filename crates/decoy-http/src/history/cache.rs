//! Call history cache.

use super::bounded::BoundedFifo;
use super::types::Exchange;
use crate::request::RequestPattern;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};

/// Recent exchanges, recent failed requests and per-pattern invocation counts.
///
/// Exchanges and failed requests are bounded by the configured capacity.
/// Counters are unbounded: every pattern that ever served a response keeps
/// its entry until `clear`.
pub struct CallHistory {
    exchanges: BoundedFifo<Exchange>,
    failed: BoundedFifo<RequestPattern>,
    counters: DashMap<RequestPattern, AtomicU64>,
    /// Shared by writers, exclusive for `clear`, so a clear never splits a
    /// counter increment from its exchange.
    epoch: RwLock<()>,
}

impl CallHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            exchanges: BoundedFifo::new(capacity),
            failed: BoundedFifo::new(capacity),
            counters: DashMap::new(),
            epoch: RwLock::new(()),
        }
    }

    /// Record a served exchange against the pattern that matched it.
    pub fn record(&self, pattern: &RequestPattern, exchange: Exchange) {
        let _epoch = self.epoch.read();
        let counted = self
            .counters
            .get(pattern)
            .map(|counter| counter.fetch_add(1, Ordering::Relaxed))
            .is_some();
        if !counted {
            self.counters
                .entry(pattern.clone())
                .or_default()
                .fetch_add(1, Ordering::Relaxed);
        }
        self.exchanges.push(exchange);
    }

    /// Record a request that no priming could serve.
    pub fn record_failure(&self, request: RequestPattern) {
        let _epoch = self.epoch.read();
        self.failed.push(request);
    }

    /// Times `pattern` has served a response; zero if never.
    pub fn count(&self, pattern: &RequestPattern) -> u64 {
        self.counters
            .get(pattern)
            .map(|counter| counter.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Recorded exchanges, oldest first.
    pub fn values(&self) -> Vec<Exchange> {
        self.exchanges.values()
    }

    /// Unmatched requests, oldest first.
    pub fn failed_requests(&self) -> Vec<RequestPattern> {
        self.failed.values()
    }

    pub fn len(&self) -> usize {
        self.exchanges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.exchanges.capacity()
    }

    /// Empty exchanges, failed requests and all counters together.
    pub fn clear(&self) {
        let _epoch = self.epoch.write();
        self.exchanges.clear();
        self.failed.clear();
        self.counters.clear();
    }
}
