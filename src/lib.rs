// image-analyzer - HTTP image analysis service backed by Azure Computer Vision
// Author: kelexine (https://github.com/kelexine)

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod metrics;
pub mod server;
pub mod utils;
pub mod vision;
