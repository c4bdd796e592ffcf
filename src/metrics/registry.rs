// Prometheus metrics registry and collectors
// Author: kelexine (https://github.com/kelexine)

use lazy_static::lazy_static;
use prometheus::{
    CounterVec, HistogramVec, Opts, Registry, TextEncoder, Encoder,
    register_counter_vec_with_registry, register_histogram_vec_with_registry,
};

lazy_static! {
    /// Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    // ============================================================================
    // HTTP METRICS
    // ============================================================================

    /// Total number of HTTP requests served
    pub static ref REQUESTS_TOTAL: CounterVec = register_counter_vec_with_registry!(
        Opts::new("http_requests_total", "Total number of HTTP requests"),
        &["endpoint", "status_code"],
        REGISTRY
    ).unwrap();

    /// Request duration histogram
    pub static ref REQUEST_DURATION: HistogramVec = register_histogram_vec_with_registry!(
        prometheus::HistogramOpts::new(
            "http_request_duration_seconds",
            "Request duration in seconds"
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["endpoint"],
        REGISTRY
    ).unwrap();

    // ============================================================================
    // VISION PROVIDER METRICS
    // ============================================================================

    /// Total vision provider calls
    pub static ref VISION_CALLS: CounterVec = register_counter_vec_with_registry!(
        Opts::new("vision_calls_total", "Total vision provider calls"),
        &["operation", "outcome"], // operation: analyze, ocr, moderate
        REGISTRY
    ).unwrap();

    /// Vision provider call duration
    pub static ref VISION_DURATION: HistogramVec = register_histogram_vec_with_registry!(
        prometheus::HistogramOpts::new(
            "vision_call_duration_seconds",
            "Vision provider call duration"
        )
        .buckets(vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["operation"],
        REGISTRY
    ).unwrap();
}

/// Gather all metrics and return as Prometheus text format
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return String::new();
    }
    String::from_utf8_lossy(&buffer).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_registration() {
        VISION_CALLS.with_label_values(&["analyze", "success"]).inc();
        REQUESTS_TOTAL.with_label_values(&["/v1/analyze", "200"]).inc();

        let metrics = gather_metrics();
        assert!(metrics.contains("vision_calls_total"));
        assert!(metrics.contains("http_requests_total"));
    }
}
