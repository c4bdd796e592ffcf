// Configuration module
// Author: kelexine (https://github.com/kelexine)

mod models;

pub use models::*;

use crate::error::{AppError, Result};
use config::{Config, Environment, File};
use std::path::{Path, PathBuf};

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (highest)
    /// 2. Config file (`path`, or `~/.image-analyzer/config.toml`)
    /// 3. Defaults (lowest)
    ///
    /// CLI overrides are applied by the caller afterwards.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        // An explicit path must exist; the default location is optional
        let file = match path {
            Some(path) => File::from(path.to_path_buf()).required(true),
            None => File::with_name(&Self::default_config_path()).required(false),
        };

        let config = Config::builder()
            .add_source(Config::try_from(&Self::default())?)
            .add_source(file)
            // e.g. IMAGE_ANALYZER_VISION__API_KEY
            .add_source(
                Environment::with_prefix("IMAGE_ANALYZER")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let config: AppConfig = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the service cannot start with.
    pub fn validate(&self) -> Result<()> {
        if self.vision.endpoint.trim().is_empty() {
            return Err(AppError::Config("vision.endpoint must be set".to_string()));
        }
        let endpoint = &self.vision.endpoint;
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            return Err(AppError::Config(format!(
                "vision.endpoint must be an http(s) URL, got '{}'",
                endpoint
            )));
        }
        if self.vision.api_key.is_empty() {
            return Err(AppError::Config("vision.api_key must be set".to_string()));
        }
        if self.uploads.max_upload_bytes == 0 {
            return Err(AppError::Config("uploads.max_upload_bytes must be positive".to_string()));
        }
        Ok(())
    }

    fn default_config_path() -> String {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".image-analyzer")
            .join("config.toml")
            .to_string_lossy()
            .to_string()
    }
}
