//! Prometheus metrics for request latency and record mutations.
//!
//! This module provides:
//! - Student added / rejected / removed counters
//! - HTTP request latency per endpoint
//! - Prometheus recorder installation for the `/metrics` endpoint

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing::debug;

// === Metric Name Constants ===

/// HTTP request latency metric name.
pub const METRIC_HTTP_REQUEST_LATENCY: &str = "http_request_latency_ms";
/// Students added counter metric name.
pub const METRIC_STUDENTS_ADDED: &str = "students_added_total";
/// Students rejected counter metric name.
pub const METRIC_STUDENTS_REJECTED: &str = "students_rejected_total";
/// Students removed counter metric name.
pub const METRIC_STUDENTS_REMOVED: &str = "students_removed_total";

/// Initialize all metric descriptions.
/// Call this once at startup, after a recorder is installed.
pub fn init_metrics() {
    describe_histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "HTTP request latency in milliseconds"
    );

    describe_counter!(METRIC_STUDENTS_ADDED, "Total number of students added");
    describe_counter!(
        METRIC_STUDENTS_REJECTED,
        "Total number of add requests rejected by validation"
    );
    describe_counter!(
        METRIC_STUDENTS_REMOVED,
        "Total number of students removed for having no grades"
    );

    debug!("Metrics initialized");
}

/// Install the global Prometheus recorder and return its render handle.
pub fn install_prometheus() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    init_metrics();
    Ok(handle)
}

/// Record HTTP request latency.
pub fn record_http_latency(start: Instant, endpoint: &'static str) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_HTTP_REQUEST_LATENCY, "endpoint" => endpoint).record(latency_ms);
}

/// Increment students added counter.
pub fn inc_students_added() {
    counter!(METRIC_STUDENTS_ADDED).increment(1);
}

/// Increment students rejected counter.
pub fn inc_students_rejected() {
    counter!(METRIC_STUDENTS_REJECTED).increment(1);
}

/// Add to the students removed counter.
pub fn inc_students_removed(count: u64) {
    counter!(METRIC_STUDENTS_REMOVED).increment(count);
}

/// RAII guard for timing a request.
/// Records latency for its endpoint when dropped.
pub struct LatencyTimer {
    start: Instant,
    endpoint: &'static str,
}

impl LatencyTimer {
    /// Create a new latency timer for the given endpoint.
    pub fn new(endpoint: &'static str) -> Self {
        Self {
            start: Instant::now(),
            endpoint,
        }
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        record_http_latency(self.start, self.endpoint);
    }
}

/// Create a latency timer for an HTTP endpoint.
pub fn timer_http(endpoint: &'static str) -> LatencyTimer {
    LatencyTimer::new(endpoint)
}
