//! Priming store.
//!
//! Maps request patterns to their defaulting queues and resolves actual
//! requests against them. Entries are kept in insertion order and the first
//! matching pattern wins. An entry whose queue is drained and has no default
//! is removed as soon as that happens, so `list` never reports dead stubs.

use super::queue::{DefaultResponse, DefaultingQueue};
use super::types::{Baseline, PrimingError, PrimingSnapshot};
use crate::history::{CallHistory, Exchange};
use crate::metrics;
use crate::request::RequestPattern;
use crate::response::Response;
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, warn};

type Entries = IndexMap<RequestPattern, DefaultingQueue>;

/// Concurrent registry of primed patterns.
///
/// One lock guards the whole map, so a `resolve` (lookup, poll, conditional
/// removal and history record) is atomic with respect to every other
/// operation on the store.
pub struct PrimingStore {
    entries: RwLock<Entries>,
    history: Arc<CallHistory>,
}

impl PrimingStore {
    pub fn new(history: Arc<CallHistory>) -> Self {
        Self {
            entries: RwLock::new(IndexMap::new()),
            history,
        }
    }

    /// Append a response to the queue for `pattern`, creating it if needed.
    pub fn add(&self, pattern: RequestPattern, response: Response) {
        self.add_all(pattern, vec![response]);
    }

    /// Append responses in order. An empty list adds nothing.
    pub fn add_all(&self, pattern: RequestPattern, responses: Vec<Response>) {
        let mut entries = self.entries.write();
        let count = responses.len();
        if insert_responses(&mut entries, pattern.clone(), responses) {
            debug!("Primed {} with {} response(s)", pattern, count);
        }
        metrics::set_active_primings(entries.len());
    }

    /// Set or replace the default for `pattern`, creating the entry if needed.
    pub fn add_default(&self, pattern: RequestPattern, default: DefaultResponse) {
        let mut entries = self.entries.write();
        debug!(
            "Primed default for {} ({})",
            pattern,
            if default.is_dynamic() { "dynamic" } else { "static" }
        );
        insert_default(&mut entries, pattern, default);
        metrics::set_active_primings(entries.len());
    }

    /// Serve the next response for the first pattern matching `actual`.
    ///
    /// On success the exchange is recorded in the call history and counted
    /// against the matched pattern. On a miss the request is recorded as
    /// failed and `PrimingError::NotFound` is returned.
    pub fn resolve(&self, actual: &RequestPattern) -> Result<Exchange, PrimingError> {
        let mut entries = self.entries.write();

        let matched = entries
            .iter()
            .position(|(pattern, _)| pattern.matches(actual));
        let served = matched.and_then(|index| {
            let (pattern, queue) = entries.get_index_mut(index)?;
            let response = queue.poll();
            let exhausted = queue.is_exhausted();
            let pattern = pattern.clone();
            if exhausted {
                entries.shift_remove_index(index);
                debug!("Priming for {} exhausted and removed", pattern);
            }
            response.map(|response| (pattern, response))
        });

        let result = match served {
            Some((pattern, response)) => {
                let exchange = Exchange::new(actual.clone(), response);
                self.history.record(&pattern, exchange.clone());
                metrics::record_request("matched");
                debug!(
                    "Stub matched: {} -> {} (status {})",
                    actual, pattern, exchange.response.status
                );
                Ok(exchange)
            }
            None => {
                self.history.record_failure(actual.clone());
                metrics::record_request("unmatched");
                warn!("No priming found for {}", actual);
                Err(PrimingError::NotFound {
                    request: actual.clone(),
                })
            }
        };
        metrics::set_active_primings(entries.len());
        result
    }

    /// Snapshot of every live entry, in match order.
    pub fn list(&self) -> Vec<PrimingSnapshot> {
        self.entries
            .read()
            .iter()
            .map(|(pattern, queue)| PrimingSnapshot {
                request: pattern.clone(),
                responses: queue.responses().cloned().collect(),
                default: queue.default_response().cloned(),
            })
            .collect()
    }

    /// Drop every entry and re-seed from `baseline`.
    ///
    /// Call history is untouched.
    pub fn reset(&self, baseline: &Baseline) {
        let mut entries = self.entries.write();
        entries.clear();
        for definition in &baseline.primings {
            insert_responses(
                &mut entries,
                definition.request.clone(),
                definition.responses.clone(),
            );
        }
        for (pattern, default) in &baseline.defaults {
            insert_default(&mut entries, pattern.clone(), default.clone());
        }
        metrics::set_active_primings(entries.len());
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

/// Returns false when there was nothing to add.
fn insert_responses(entries: &mut Entries, pattern: RequestPattern, responses: Vec<Response>) -> bool {
    if responses.is_empty() {
        return false;
    }
    let count = responses.len();
    entries.entry(pattern).or_default().add_all(responses);
    for _ in 0..count {
        metrics::record_priming_added("response");
    }
    true
}

fn insert_default(entries: &mut Entries, pattern: RequestPattern, default: DefaultResponse) {
    entries.entry(pattern).or_default().set_default(default);
    metrics::record_priming_added("default");
}
