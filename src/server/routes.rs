// HTTP routes configuration
// Author: kelexine (https://github.com/kelexine)

use super::handlers::{
    analyze_handler, health_handler, metrics_handler, moderate_handler, ocr_handler,
};
use super::middleware::{request_id_layers, track_metrics};
use crate::analysis::ImageAnalysisService;
use crate::config::AppConfig;
use crate::error::Result;
use axum::extract::DefaultBodyLimit;
use axum::{middleware, routing::{get, post}, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Room for multipart boundaries and part headers on top of the image
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub service: ImageAnalysisService,
}

pub fn create_router(config: AppConfig, service: ImageAnalysisService) -> Result<Router> {
    let body_limit = config.uploads.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;
    let state = AppState {
        config: Arc::new(config),
        service,
    };

    let (set_request_id, propagate_request_id) = request_id_layers();

    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/v1/analyze", post(analyze_handler))
        .route("/v1/ocr", post(ocr_handler))
        .route("/v1/moderate", post(moderate_handler))
        .route_layer(middleware::from_fn(track_metrics))
        // The upload size is enforced by RequestBodyLimitLayer and the upload guard
        .layer(DefaultBodyLimit::disable())
        .layer(
            ServiceBuilder::new()
                .layer(set_request_id)
                .layer(propagate_request_id)
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(body_limit)),
        )
        .with_state(state);

    Ok(app)
}
