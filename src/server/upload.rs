// Multipart upload persistence
// Author: kelexine (https://github.com/kelexine)

use crate::config::UploadConfig;
use crate::error::{AppError, Result};
use crate::vision::models::SNIFF_LEN;
use crate::vision::ImageFormat;
use axum::extract::multipart::{Field, MultipartError};
use axum::extract::Multipart;
use axum::http::StatusCode;
use tempfile::NamedTempFile;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Multipart field carrying the image
pub const IMAGE_FIELD: &str = "image";

/// An uploaded image persisted to a temporary file.
///
/// The file is deleted when this guard drops, whichever way the request ends.
#[derive(Debug)]
pub struct TempUpload {
    file: NamedTempFile,
    len: usize,
    format: ImageFormat,
}

impl TempUpload {
    /// Stream the `image` field of a multipart body to disk.
    pub async fn from_multipart(multipart: &mut Multipart, config: &UploadConfig) -> Result<Self> {
        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            if field.name() == Some(IMAGE_FIELD) {
                return Self::persist(field, config).await;
            }
            debug!("Skipping multipart field {:?}", field.name());
        }

        Err(AppError::InvalidRequest(format!(
            "multipart body must contain an '{}' field",
            IMAGE_FIELD
        )))
    }

    async fn persist(mut field: Field<'_>, config: &UploadConfig) -> Result<Self> {
        let builder = {
            let mut builder = tempfile::Builder::new();
            builder.prefix("image-analyzer-").suffix(".upload");
            builder
        };
        let file = match &config.temp_dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };

        let mut writer = tokio::fs::File::from_std(file.reopen()?);
        let mut header = Vec::with_capacity(SNIFF_LEN);
        let mut len = 0usize;

        while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
            len += chunk.len();
            if len > config.max_upload_bytes {
                return Err(AppError::PayloadTooLarge(format!(
                    "image exceeds maximum of {} bytes",
                    config.max_upload_bytes
                )));
            }
            if header.len() < SNIFF_LEN {
                let take = (SNIFF_LEN - header.len()).min(chunk.len());
                header.extend_from_slice(&chunk[..take]);
            }
            writer.write_all(&chunk).await?;
        }
        writer.flush().await?;

        if len == 0 {
            return Err(AppError::InvalidRequest("image is empty".to_string()));
        }

        let format = ImageFormat::sniff(&header).ok_or_else(|| {
            AppError::UnsupportedMediaType("expected a JPEG, PNG, GIF or BMP image".to_string())
        })?;

        debug!(
            "Persisted {} upload ({} bytes) to {}",
            format.mime_type(),
            len,
            file.path().display()
        );

        Ok(Self { file, len, format })
    }

    /// Open a fresh reader over the persisted bytes
    pub async fn open(&self) -> Result<tokio::fs::File> {
        Ok(tokio::fs::File::open(self.file.path()).await?)
    }

    /// Size of the persisted upload
    pub fn byte_len(&self) -> usize {
        self.len
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::Upload(err.body_text())
    }
}
