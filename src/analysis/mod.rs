//! Image analysis orchestration layer.
//!
//! Chooses the provider features each operation needs, calls the provider,
//! and reduces its payloads to stable result types.
//!
//! # Submodules
//!
//! - `mapping`: Pure payload-to-result functions.
//! - `models`: `AnalysisResult`, `ModerationResult` and friends.
//! - `service`: `ImageAnalysisService`, the three operations.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod mapping;
pub mod models;
mod service;

pub use models::{AnalysisResult, ExtractedText, ModerationResult, NO_DESCRIPTION};
pub use service::ImageAnalysisService;
