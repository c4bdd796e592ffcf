// Metrics module for Prometheus observability
// Author: kelexine (https://github.com/kelexine)

mod registry;

pub use registry::{
    gather_metrics,
    REQUESTS_TOTAL,
    REQUEST_DURATION,
    VISION_CALLS,
    VISION_DURATION,
};

use crate::error::VisionError;

/// Helper to record request metrics
pub fn record_request(endpoint: &str, status_code: u16, duration_secs: f64) {
    REQUESTS_TOTAL
        .with_label_values(&[endpoint, &status_code.to_string()])
        .inc();

    REQUEST_DURATION
        .with_label_values(&[endpoint])
        .observe(duration_secs);
}

/// Helper to record vision provider call metrics
pub fn record_vision_call(operation: &str, outcome: &str, duration_secs: f64) {
    VISION_CALLS
        .with_label_values(&[operation, outcome])
        .inc();

    VISION_DURATION
        .with_label_values(&[operation])
        .observe(duration_secs);
}

/// Low-cardinality label for a failed provider call
pub fn outcome_label(err: &VisionError) -> &'static str {
    match err {
        VisionError::Network(_) => "network_error",
        VisionError::Timeout(_) => "timeout",
        VisionError::Authentication(_) => "auth_error",
        VisionError::InvalidImage(_) => "invalid_image",
        VisionError::QuotaExceeded(_) => "quota_exceeded",
        VisionError::Api { .. } => "api_error",
        VisionError::UnexpectedPayload(_) => "bad_payload",
        VisionError::ImageRead(_) => "read_error",
    }
}
