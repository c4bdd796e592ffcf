// CLI module for image-analyzer
// Author: kelexine (https://github.com/kelexine)

use clap::Parser;
use std::path::PathBuf;

/// image-analyzer - HTTP image analysis service backed by Azure Computer Vision
#[derive(Parser, Debug)]
#[command(name = "image-analyzer", version, about, long_about = None)]
pub struct Args {
    /// Path to a TOML config file (default: ~/.image-analyzer/config.toml)
    #[arg(short, long, env = "IMAGE_ANALYZER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the bind address from config
    #[arg(long)]
    pub host: Option<String>,

    /// Override the listen port from config
    #[arg(short, long)]
    pub port: Option<u16>,
}

impl Args {
    /// Apply command-line overrides on top of loaded configuration
    pub fn apply(&self, config: &mut crate::config::AppConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
    }
}
