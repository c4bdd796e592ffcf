//! Axum-based HTTP server for the image analyzer.
//!
//! Accepts multipart image uploads, persists each to a scoped temporary
//! file, and hands it to the `ImageAnalysisService`.
//!
//! # Components
//!
//! - `handlers`: Analyze, OCR, moderation, health and metrics endpoints.
//! - `middleware`: Request ID propagation and request metrics.
//! - `routes`: The main router configuration that ties everything together.
//! - `upload`: Temporary-file guard for uploaded images.
//!
//! Author: kelexine (<https://github.com/kelexine>)

mod handlers;
mod middleware;
mod routes;
pub mod upload;

pub use handlers::{HealthResponse, HealthStatus};
pub use routes::{create_router, AppState};
