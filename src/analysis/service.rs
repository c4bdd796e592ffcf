// Image analysis orchestration
// Author: kelexine (https://github.com/kelexine)

use super::mapping::{extract_text, map_analysis, map_moderation};
use super::models::{AnalysisResult, ModerationResult};
use crate::error::{ServiceError, VisionError};
use crate::metrics;
use crate::vision::{FeatureSet, VisionProvider};
use bytes::Bytes;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{debug, info, warn};

/// Front door for analyze, OCR and moderation calls.
///
/// Holds only the provider handle, so clones and concurrent calls are safe
/// without locking.
#[derive(Clone)]
pub struct ImageAnalysisService {
    provider: Arc<dyn VisionProvider>,
}

impl ImageAnalysisService {
    pub fn new(provider: Arc<dyn VisionProvider>) -> Self {
        Self { provider }
    }

    /// Provider base address
    pub fn endpoint(&self) -> &str {
        self.provider.endpoint()
    }

    /// Caption, tags, objects and categories for one image.
    pub async fn analyze<R>(&self, image: R) -> Result<AnalysisResult, ServiceError>
    where
        R: AsyncRead + Unpin + Send,
    {
        let result = async {
            let bytes = read_image(image).await?;
            let call = self.provider.analyze(bytes, FeatureSet::ANALYZE);
            let response = observe("analyze", call).await?;
            Ok::<_, VisionError>(map_analysis(response))
        }
        .await
        .map_err(ServiceError::Analysis)?;

        info!(
            "Analyzed image: {} tags, {} objects, {} categories",
            result.tags().len(),
            result.detected_objects().len(),
            result.categories().len()
        );
        Ok(result)
    }

    /// Printed text in reading order; empty when none is found.
    pub async fn extract_text<R>(&self, image: R) -> Result<String, ServiceError>
    where
        R: AsyncRead + Unpin + Send,
    {
        let text = async {
            let bytes = read_image(image).await?;
            let response = observe("ocr", self.provider.recognize_text(bytes)).await?;
            Ok::<_, VisionError>(extract_text(&response))
        }
        .await
        .map_err(ServiceError::TextExtraction)?;

        info!("Extracted {} characters of text", text.chars().count());
        Ok(text)
    }

    /// Provider adult/racy decisions and scores, unchanged.
    pub async fn moderate<R>(&self, image: R) -> Result<ModerationResult, ServiceError>
    where
        R: AsyncRead + Unpin + Send,
    {
        let result = async {
            let bytes = read_image(image).await?;
            let call = self.provider.analyze(bytes, FeatureSet::MODERATE);
            let response = observe("moderate", call).await?;
            map_moderation(response)
        }
        .await
        .map_err(ServiceError::Moderation)?;

        info!(
            "Moderated image: adult={} racy={}",
            result.contains_adult_content, result.contains_racy_content
        );
        Ok(result)
    }
}

/// Drain the caller's byte source once.
async fn read_image<R>(mut image: R) -> Result<Bytes, VisionError>
where
    R: AsyncRead + Unpin + Send,
{
    let mut buf = Vec::new();
    image
        .read_to_end(&mut buf)
        .await
        .map_err(|e| VisionError::ImageRead(e.to_string()))?;
    debug!("Read {} bytes of image data", buf.len());
    Ok(Bytes::from(buf))
}

/// Time a provider call and record its outcome
async fn observe<T, F>(operation: &str, call: F) -> Result<T, VisionError>
where
    F: Future<Output = Result<T, VisionError>>,
{
    let start = Instant::now();
    let result = call.await;
    let elapsed = start.elapsed().as_secs_f64();

    match &result {
        Ok(_) => {
            debug!("Vision {} call succeeded in {:.3}s", operation, elapsed);
            metrics::record_vision_call(operation, "success", elapsed);
        }
        Err(e) => {
            warn!("Vision {} call failed after {:.3}s: {}", operation, elapsed, e);
            metrics::record_vision_call(operation, metrics::outcome_label(e), elapsed);
        }
    }
    result
}
