//! Prometheus metrics for decoy.
//!
//! Tracks stub traffic, priming activity and verification outcomes.
use lazy_static::lazy_static;
use prometheus::{
    register_counter_vec, register_histogram_vec, register_int_gauge, CounterVec, Encoder,
    HistogramVec, IntGauge, TextEncoder,
};

lazy_static! {
    /// Stub requests by resolution outcome
    pub static ref REQUESTS_TOTAL: CounterVec = register_counter_vec!(
        "decoy_requests_total",
        "Total number of stub requests resolved",
        &["outcome"]  // outcome: matched|unmatched|malformed
    )
    .expect("decoy_requests_total registers once");

    /// Primings added at runtime or from the baseline
    pub static ref PRIMINGS_ADDED_TOTAL: CounterVec = register_counter_vec!(
        "decoy_primings_added_total",
        "Total number of primings added",
        &["kind"]  // kind: response|default
    )
    .expect("decoy_primings_added_total registers once");

    /// Live entries in the priming store
    pub static ref ACTIVE_PRIMINGS: IntGauge = register_int_gauge!(
        "decoy_active_primings",
        "Number of live request patterns in the priming store"
    )
    .expect("decoy_active_primings registers once");

    /// Verification outcomes
    pub static ref VERIFICATIONS_TOTAL: CounterVec = register_counter_vec!(
        "decoy_verifications_total",
        "Total number of invocation verifications",
        &["result"]  // result: passed|failed
    )
    .expect("decoy_verifications_total registers once");

    /// Configured response delays actually applied
    pub static ref RESPONSE_DELAY_MS: HistogramVec = register_histogram_vec!(
        "decoy_response_delay_ms",
        "Histogram of applied response delays in milliseconds",
        &["status"],
        vec![10.0, 50.0, 100.0, 250.0, 500.0, 1000.0, 2500.0, 5000.0]
    )
    .expect("decoy_response_delay_ms registers once");
}

/// Collect and return all metrics in Prometheus text format
pub fn collect_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::warn!("Failed to encode metrics: {}", e);
        return String::new();
    }
    String::from_utf8_lossy(&buffer).into_owned()
}

pub fn record_request(outcome: &str) {
    REQUESTS_TOTAL.with_label_values(&[outcome]).inc();
}

pub fn record_priming_added(kind: &str) {
    PRIMINGS_ADDED_TOTAL.with_label_values(&[kind]).inc();
}

pub fn set_active_primings(count: usize) {
    ACTIVE_PRIMINGS.set(count as i64);
}

pub fn record_verification(passed: bool) {
    let result = if passed { "passed" } else { "failed" };
    VERIFICATIONS_TOTAL.with_label_values(&[result]).inc();
}

pub fn record_response_delay(status: u16, delay_ms: u64) {
    RESPONSE_DELAY_MS
        .with_label_values(&[&status.to_string()])
        .observe(delay_ms as f64);
}
