//! Thumbnail attachment, parameterized by a storage strategy.
//!
//! One flow serves both persistence styles: `ObjectStoreSink` writes the
//! bytes to the object store and publishes its URL; `InlineSink` encodes the
//! bytes into a data URL stored on the record itself. The strategy is chosen
//! from configuration at startup, not by separate code paths.

use async_trait::async_trait;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine as _;
use rand::RngCore;
use reelstore_core::models::VideoRecord;
use reelstore_core::{AppError, VideoRecordStore};
use reelstore_storage::{keys, ObjectStorage};
use std::sync::Arc;
use uuid::Uuid;

const ALLOWED_THUMBNAIL_TYPES: [(&str, &str); 2] = [("image/png", "png"), ("image/jpeg", "jpg")];

fn extension_for(media_type: &str) -> Option<&'static str> {
    ALLOWED_THUMBNAIL_TYPES
        .iter()
        .find(|(t, _)| *t == media_type)
        .map(|(_, ext)| *ext)
}

/// Where thumbnail bytes end up; returns the reference to store on the record.
#[async_trait]
pub trait ThumbnailSink: Send + Sync {
    async fn store(&self, data: Vec<u8>, content_type: &str, extension: &str)
        -> Result<String, AppError>;
}

/// Persist to the object store under a random URL-safe name.
pub struct ObjectStoreSink {
    storage: Arc<dyn ObjectStorage>,
}

impl ObjectStoreSink {
    pub fn new(storage: Arc<dyn ObjectStorage>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl ThumbnailSink for ObjectStoreSink {
    async fn store(
        &self,
        data: Vec<u8>,
        content_type: &str,
        extension: &str,
    ) -> Result<String, AppError> {
        let mut name_bytes = [0u8; 32];
        rand::rng().fill_bytes(&mut name_bytes);
        let name = URL_SAFE_NO_PAD.encode(name_bytes);

        let key = keys::thumbnail_object_key(&name, extension);
        self.storage
            .put(&key, data, content_type)
            .await
            .map_err(|e| AppError::Upload(e.to_string()))
    }
}

/// Inline-encode into a data URL; nothing leaves the record store.
pub struct InlineSink;

#[async_trait]
impl ThumbnailSink for InlineSink {
    async fn store(
        &self,
        data: Vec<u8>,
        content_type: &str,
        _extension: &str,
    ) -> Result<String, AppError> {
        Ok(format!("data:{};base64,{}", content_type, STANDARD.encode(data)))
    }
}

/// Validates, stores, and publishes a thumbnail for a video record.
pub struct ThumbnailService {
    records: Arc<dyn VideoRecordStore>,
    sink: Arc<dyn ThumbnailSink>,
    max_size_bytes: usize,
}

impl ThumbnailService {
    pub fn new(
        records: Arc<dyn VideoRecordStore>,
        sink: Arc<dyn ThumbnailSink>,
        max_size_bytes: usize,
    ) -> Self {
        Self {
            records,
            sink,
            max_size_bytes,
        }
    }

    pub async fn attach(
        &self,
        video_id: Uuid,
        caller: Uuid,
        declared_content_type: &str,
        data: Vec<u8>,
    ) -> Result<VideoRecord, AppError> {
        let media_type = declared_content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        let extension = extension_for(&media_type).ok_or_else(|| {
            AppError::InvalidInput(
                "only JPEG and PNG images are allowed as thumbnails".to_string(),
            )
        })?;

        if data.len() > self.max_size_bytes {
            return Err(AppError::PayloadTooLarge(format!(
                "thumbnail exceeds the {} byte limit",
                self.max_size_bytes
            )));
        }
        if data.is_empty() {
            return Err(AppError::InvalidInput("empty thumbnail upload".to_string()));
        }

        let mut record = self
            .records
            .get_video(video_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("video {} not found", video_id)))?;

        if record.user_id != caller {
            return Err(AppError::Unauthorized(
                "not the owner of this video".to_string(),
            ));
        }

        let reference = self.sink.store(data, &media_type, extension).await?;

        record.thumbnail_url = Some(reference);
        record.updated_at = chrono::Utc::now();
        self.records
            .update_video(&record)
            .await
            .map_err(|e| AppError::RecordUpdate(e.to_string()))?;

        tracing::info!(video_id = %video_id, "Thumbnail attached");
        Ok(record)
    }
}
