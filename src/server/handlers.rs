// HTTP request handlers
// Author: kelexine (https://github.com/kelexine)

use super::routes::AppState;
use super::upload::TempUpload;
use crate::analysis::{AnalysisResult, ExtractedText, ModerationResult};
use crate::error::AppError;
use crate::metrics::gather_metrics;
use axum::extract::{Multipart, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{error, info};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub checks: HashMap<String, HealthCheck>,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheck {
    pub status: String,
    pub message: String,
}

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let mut checks = HashMap::new();

    // No provider round-trip here; a health check must not spend quota
    checks.insert(
        "vision_provider".to_string(),
        HealthCheck {
            status: "ok".to_string(),
            message: format!("Endpoint: {}", state.service.endpoint()),
        },
    );
    checks.insert(
        "uploads".to_string(),
        HealthCheck {
            status: "ok".to_string(),
            message: format!("Max upload: {} bytes", state.config.uploads.max_upload_bytes),
        },
    );

    Json(HealthResponse {
        status: HealthStatus::Healthy,
        checks,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Handler for POST /v1/analyze
pub async fn analyze_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisResult>, AppError> {
    let upload = TempUpload::from_multipart(&mut multipart, &state.config.uploads).await?;
    info!(
        "Received analyze request: {} ({} bytes)",
        upload.format().mime_type(),
        upload.byte_len()
    );

    let image = upload.open().await?;
    let result = state.service.analyze(image).await.map_err(|e| {
        error!("Image analysis failed: {}", e);
        AppError::from(e)
    })?;

    Ok(Json(result))
}

/// Handler for POST /v1/ocr
pub async fn ocr_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ExtractedText>, AppError> {
    let upload = TempUpload::from_multipart(&mut multipart, &state.config.uploads).await?;
    info!(
        "Received OCR request: {} ({} bytes)",
        upload.format().mime_type(),
        upload.byte_len()
    );

    let image = upload.open().await?;
    let text = state.service.extract_text(image).await.map_err(|e| {
        error!("Text extraction failed: {}", e);
        AppError::from(e)
    })?;

    Ok(Json(ExtractedText { text }))
}

/// Handler for POST /v1/moderate
pub async fn moderate_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ModerationResult>, AppError> {
    let upload = TempUpload::from_multipart(&mut multipart, &state.config.uploads).await?;
    info!(
        "Received moderation request: {} ({} bytes)",
        upload.format().mime_type(),
        upload.byte_len()
    );

    let image = upload.open().await?;
    let result = state.service.moderate(image).await.map_err(|e| {
        error!("Image moderation failed: {}", e);
        AppError::from(e)
    })?;

    Ok(Json(result))
}

/// Handler for GET /metrics (Prometheus text exposition)
pub async fn metrics_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        gather_metrics(),
    )
}
