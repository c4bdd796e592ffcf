// Error types for image-analyzer
// Author: kelexine (https://github.com/kelexine)

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

/// Transport-level cause kept behind an `Arc` so errors stay cheap to clone
pub type TransportError = Arc<dyn std::error::Error + Send + Sync>;

/// Failure reported by (or while talking to) the vision provider.
#[derive(Error, Debug, Clone)]
pub enum VisionError {
    #[error("Network error: {0}")]
    Network(#[source] TransportError),

    #[error("Provider request timed out: {0}")]
    Timeout(#[source] TransportError),

    #[error("Authentication rejected by provider: {0}")]
    Authentication(String),

    #[error("Image rejected by provider: {0}")]
    InvalidImage(String),

    #[error("Provider quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("Provider error (HTTP {status}, {code}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    #[error("Unexpected provider payload: {0}")]
    UnexpectedPayload(String),

    #[error("Failed to read image data: {0}")]
    ImageRead(String),
}

impl VisionError {
    /// Wrap a connection-level failure, keeping it as the error source
    pub fn network<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        VisionError::Network(Arc::new(err))
    }
}

impl From<reqwest::Error> for VisionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            VisionError::Timeout(Arc::new(err))
        } else if err.is_decode() {
            VisionError::UnexpectedPayload(err.to_string())
        } else {
            VisionError::network(err)
        }
    }
}

/// One variant per service operation, each carrying the provider cause.
#[derive(Error, Debug, Clone)]
pub enum ServiceError {
    #[error("Failed to analyze image")]
    Analysis(#[source] VisionError),

    #[error("Failed to extract text from image")]
    TextExtraction(#[source] VisionError),

    #[error("Failed to moderate image")]
    Moderation(#[source] VisionError),
}

impl ServiceError {
    /// The underlying provider failure.
    pub fn cause(&self) -> &VisionError {
        match self {
            ServiceError::Analysis(cause)
            | ServiceError::TextExtraction(cause)
            | ServiceError::Moderation(cause) => cause,
        }
    }
}

/// Errors surfaced at the HTTP boundary.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Upload error: {0}")]
    Upload(String),

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}: {}", .0.cause())]
    Service(#[from] ServiceError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl AppError {
    /// HTTP status and machine-readable error type for this error.
    pub fn classify(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::InvalidRequest(_) | AppError::Upload(_) => {
                (StatusCode::BAD_REQUEST, "invalid_request_error")
            }
            AppError::UnsupportedMediaType(_) => {
                (StatusCode::UNSUPPORTED_MEDIA_TYPE, "unsupported_media_type")
            }
            AppError::PayloadTooLarge(_) => (StatusCode::PAYLOAD_TOO_LARGE, "payload_too_large"),
            AppError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "configuration_error"),
            AppError::Service(err) => match err.cause() {
                VisionError::InvalidImage(_) => (StatusCode::BAD_REQUEST, "invalid_image_error"),
                VisionError::QuotaExceeded(_) => {
                    (StatusCode::TOO_MANY_REQUESTS, "rate_limit_error")
                }
                VisionError::Authentication(_) => {
                    (StatusCode::BAD_GATEWAY, "upstream_auth_error")
                }
                VisionError::Network(_) => {
                    (StatusCode::SERVICE_UNAVAILABLE, "upstream_unavailable")
                }
                VisionError::Timeout(_) => (StatusCode::GATEWAY_TIMEOUT, "upstream_timeout"),
                VisionError::ImageRead(_) => (StatusCode::INTERNAL_SERVER_ERROR, "api_error"),
                VisionError::Api { .. } | VisionError::UnexpectedPayload(_) => {
                    (StatusCode::BAD_GATEWAY, "api_error")
                }
            },
            AppError::Io(_) | AppError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "api_error")
            }
        }
    }
}

// Convert AppError to HTTP responses for Axum
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type) = self.classify();

        let body = json!({
            "type": "error",
            "error": {
                "type": error_type,
                "message": self.to_string(),
            }
        });

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
