// Azure Computer Vision REST client
// Author: kelexine (https://github.com/kelexine)

use super::models::{AnalyzeResponse, FeatureSet, OcrResponse, ProviderErrorResponse};
use crate::config::{ApiKey, VisionConfig};
use crate::error::{AppError, VisionError};
use crate::utils::logging::redact;
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error};

const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// Remote vision-analysis provider.
///
/// Implementations hold only immutable connection state so a single handle
/// can serve concurrent requests.
#[async_trait]
pub trait VisionProvider: Send + Sync {
    /// Run an analyze call computing exactly the requested features.
    async fn analyze(
        &self,
        image: Bytes,
        features: FeatureSet,
    ) -> Result<AnalyzeResponse, VisionError>;

    /// Recognize printed text in the image.
    async fn recognize_text(&self, image: Bytes) -> Result<OcrResponse, VisionError>;

    /// Provider base address, for diagnostics
    fn endpoint(&self) -> &str;
}

/// Client for the Azure Computer Vision v3.x REST API.
pub struct AzureVisionClient {
    http_client: Client,
    config: VisionConfig,
}

impl AzureVisionClient {
    /// Build a client from configuration. No network traffic happens here.
    pub fn new(config: &VisionConfig) -> Result<Self, AppError> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_nodelay(true)
            .use_rustls_tls()
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        debug!("Created vision HTTP client for {}", config.endpoint);

        Ok(Self {
            http_client,
            config: config.clone(),
        })
    }

    fn url(&self, operation: &str) -> String {
        format!(
            "{}/vision/{}/{}",
            self.config.endpoint.trim_end_matches('/'),
            self.config.api_version,
            operation
        )
    }

    fn api_key(&self) -> &ApiKey {
        &self.config.api_key
    }

    /// POST the image bytes and decode a successful JSON body.
    async fn post_image<T: DeserializeOwned>(
        &self,
        operation: &str,
        query: &[(&str, String)],
        image: Bytes,
    ) -> Result<T, VisionError> {
        let url = self.url(operation);
        debug!("Calling {} ({} bytes)", url, image.len());

        let response = self
            .http_client
            .post(&url)
            .query(query)
            .header(SUBSCRIPTION_KEY_HEADER, self.api_key().expose())
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(image)
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            let body = redact(&response_text, self.api_key().expose());
            error!("Vision API error: HTTP {} - Response body: {}", status, body);
            return Err(Self::classify_error(status, &body));
        }

        serde_json::from_str(&response_text).map_err(|e| {
            error!("Failed to parse vision response: {}", e);
            VisionError::UnexpectedPayload(format!("Response parsing error: {}", e))
        })
    }

    /// Map a non-2xx response onto a provider error variant
    fn classify_error(status: StatusCode, body: &str) -> VisionError {
        let (code, message) = Self::extract_error(body);
        let message = message.unwrap_or_else(|| body.to_string());

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                VisionError::Authentication(message)
            }
            StatusCode::TOO_MANY_REQUESTS => VisionError::QuotaExceeded(message),
            StatusCode::BAD_REQUEST
            | StatusCode::PAYLOAD_TOO_LARGE
            | StatusCode::UNSUPPORTED_MEDIA_TYPE => VisionError::InvalidImage(message),
            _ => VisionError::Api {
                status: status.as_u16(),
                code: code.unwrap_or_else(|| "Unknown".to_string()),
                message,
            },
        }
    }

    /// Extract code and message from the provider's error envelope
    fn extract_error(body: &str) -> (Option<String>, Option<String>) {
        match serde_json::from_str::<ProviderErrorResponse>(body) {
            Ok(ProviderErrorResponse { error: Some(detail) }) => (detail.code, detail.message),
            _ => (None, None),
        }
    }
}

#[async_trait]
impl VisionProvider for AzureVisionClient {
    async fn analyze(
        &self,
        image: Bytes,
        features: FeatureSet,
    ) -> Result<AnalyzeResponse, VisionError> {
        let query = [("visualFeatures", features.to_query_value())];
        self.post_image("analyze", &query, image).await
    }

    async fn recognize_text(&self, image: Bytes) -> Result<OcrResponse, VisionError> {
        let query = [
            ("language", self.config.ocr_language.clone()),
            ("detectOrientation", self.config.detect_orientation.to_string()),
        ];
        self.post_image("ocr", &query, image).await
    }

    fn endpoint(&self) -> &str {
        &self.config.endpoint
    }
}
