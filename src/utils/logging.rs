//! Structured logging and secret-safe trace utilities.
//!
//! This module configures the `tracing` ecosystem for the application,
//! supporting multiple output formats and keeping the provider subscription
//! key out of log sinks.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use crate::config::LoggingConfig;
use crate::error::{AppError, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the global tracing subscriber for the application.
///
/// Supports two output formats:
/// - `json`: Structured JSON logs for production ingestion.
/// - `pretty` (default): Human-readable, colorized output for development.
///
/// Log levels are controlled via the `RUST_LOG` environment variable or
/// the provided `LoggingConfig`.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    let installed = match config.format.as_str() {
        "json" => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        _ => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .try_init(),
    };

    installed.map_err(|e| AppError::Internal(format!("Failed to initialize logging: {}", e)))
}

/// Replaces every occurrence of `secret` in `input` with a placeholder.
///
/// Provider error bodies can echo request headers back; run them through
/// this before logging. Empty secrets leave the input untouched.
pub fn redact(input: &str, secret: &str) -> String {
    if secret.is_empty() {
        return input.to_string();
    }
    input.replace(secret, "[REDACTED_API_KEY]")
}

/// Short, non-reversible hint of a secret for startup logs (`****cdef`).
pub fn mask(secret: &str) -> String {
    let tail: String = secret
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    if secret.chars().count() <= 8 {
        "****".to_string()
    } else {
        format!("****{}", tail)
    }
}
