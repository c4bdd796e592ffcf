//! Configuration data structures for the image analyzer.
//!
//! This module defines the schema for the application settings, including
//! server parameters, the vision provider connection, and upload limits.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// The root configuration object for the application.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// HTTP server settings (host, port).
    #[serde(default)]
    pub server: ServerConfig,

    /// Remote vision provider settings.
    #[serde(default)]
    pub vision: VisionConfig,

    /// Upload handling limits.
    #[serde(default)]
    pub uploads: UploadConfig,

    /// Logging and observability settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for the built-in HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The IP address or hostname the server should bind to.
    /// Default: `127.0.0.1`
    #[serde(default = "default_host")]
    pub host: String,

    /// The port number the server should listen on.
    /// Default: `8080`
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Subscription key for the vision provider.
///
/// Wiped from memory on drop and never printed by `Debug`.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(transparent)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey([REDACTED])")
    }
}

/// Settings for the Azure Computer Vision connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisionConfig {
    /// Resource endpoint, e.g. `https://my-resource.cognitiveservices.azure.com`.
    /// No default; must be supplied.
    #[serde(default)]
    pub endpoint: String,

    /// Subscription key sent as `Ocp-Apim-Subscription-Key`.
    #[serde(default)]
    pub api_key: ApiKey,

    /// REST API version segment.
    /// Default: `v3.2`
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Request timeout in seconds.
    /// Default: `30`
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// BCP-47 language hint for OCR; `unk` lets the provider detect it.
    /// Default: `unk`
    #[serde(default = "default_ocr_language")]
    pub ocr_language: String,

    /// Whether OCR should detect and correct text orientation.
    /// Default: `true`
    #[serde(default = "default_true")]
    pub detect_orientation: bool,
}

/// Settings for incoming image uploads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Largest accepted image in bytes.
    /// Default: 4 MiB (provider limit for v3.2)
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,

    /// Directory for temporary upload files. System temp dir when unset.
    #[serde(default)]
    pub temp_dir: Option<PathBuf>,
}

/// Settings for application logging and output format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum log level (`trace`, `debug`, `info`, `warn`, `error`).
    /// Default: `info`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format for logs (`pretty`, `json`).
    /// Default: `pretty`
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key: ApiKey::default(),
            api_version: default_api_version(),
            timeout_seconds: default_timeout(),
            ocr_language: default_ocr_language(),
            detect_orientation: true,
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: default_max_upload_bytes(),
            temp_dir: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

// Helper functions for serde defaults
fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_api_version() -> String {
    "v3.2".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_ocr_language() -> String {
    "unk".to_string()
}

fn default_true() -> bool {
    true
}

fn default_max_upload_bytes() -> usize {
    4 * 1024 * 1024
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}
