//! Video ingestion orchestration: stage → inspect → prepare → upload → publish.

use bytes::Bytes;
use futures::Stream;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempPath;
use uuid::Uuid;

use reelstore_core::models::VideoRecord;
use reelstore_core::{AppError, VideoRecordStore};
use reelstore_storage::{keys, ObjectStorage};

use crate::faststart::PlaybackPreparer;
use crate::probe::ContainerInspector;
use crate::staging::StagedUpload;

/// The only video container type accepted on ingest.
pub const ALLOWED_VIDEO_TYPE: &str = "video/mp4";

/// Config for the ingestion pipeline (staging location, size cap).
#[derive(Clone, Debug)]
pub struct IngestConfig {
    pub staging_dir: PathBuf,
    pub max_video_size_bytes: u64,
}

/// Orchestrates a full ingestion run for one uploaded video.
///
/// Steps are strictly sequential within a run. Concurrent runs share only the
/// staging directory (unique file names, no locking); two ingestions of the
/// same record race last-write-wins on the publish step.
pub struct IngestOrchestrator {
    records: Arc<dyn VideoRecordStore>,
    storage: Arc<dyn ObjectStorage>,
    inspector: ContainerInspector,
    preparer: Arc<dyn PlaybackPreparer>,
    config: IngestConfig,
}

impl IngestOrchestrator {
    pub fn new(
        records: Arc<dyn VideoRecordStore>,
        storage: Arc<dyn ObjectStorage>,
        inspector: ContainerInspector,
        preparer: Arc<dyn PlaybackPreparer>,
        config: IngestConfig,
    ) -> Self {
        Self {
            records,
            storage,
            inspector,
            preparer,
            config,
        }
    }

    /// Run the full pipeline for one upload and return the updated record.
    ///
    /// Ownership is checked before any body byte is staged. The staged file
    /// and any prepared artifact are removed on every exit path. Retrying a
    /// failed ingestion end-to-end is safe: the object key is deterministic
    /// per (record, orientation), so a retry overwrites rather than orphans.
    pub async fn ingest<S>(
        &self,
        video_id: Uuid,
        caller: Uuid,
        declared_content_type: &str,
        body: S,
    ) -> Result<VideoRecord, AppError>
    where
        S: Stream<Item = Result<Bytes, std::io::Error>> + Send + Unpin,
    {
        tracing::info!(video_id = %video_id, "Starting video ingestion");

        let media_type = declared_content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        if media_type.is_empty() {
            return Err(AppError::InvalidInput(
                "missing Content-Type for video".to_string(),
            ));
        }
        if media_type != ALLOWED_VIDEO_TYPE {
            return Err(AppError::InvalidInput(format!(
                "only {} videos are allowed, got {}",
                ALLOWED_VIDEO_TYPE, media_type
            )));
        }

        let mut record = self
            .records
            .get_video(video_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("video {} not found", video_id)))?;

        // Before the body is read: bytes buffered by the transport for a
        // rejected caller get discarded with the request, never staged.
        if record.user_id != caller {
            return Err(AppError::Unauthorized(
                "not the owner of this video".to_string(),
            ));
        }

        let staged = StagedUpload::receive(
            &self.config.staging_dir,
            self.config.max_video_size_bytes,
            body,
        )
        .await?;

        let orientation = self.inspector.inspect(staged.path()).await?;
        tracing::info!(
            video_id = %video_id,
            orientation = %orientation,
            size_bytes = staged.size(),
            "Upload staged and classified"
        );

        let prepared_path = self.preparer.prepare(staged.path()).await?;
        // A distinct prepared artifact gets the same removal guarantee as the
        // stage file itself.
        let _prepared_guard: Option<TempPath> = if prepared_path != staged.path() {
            Some(TempPath::from_path(prepared_path.clone()))
        } else {
            None
        };

        let key = keys::video_object_key(video_id, orientation);

        // Streamed, not buffered: the prepared file can be as large as the cap.
        let file = tokio::fs::File::open(&prepared_path)
            .await
            .map_err(|e| AppError::Staging {
                message: "failed to open prepared file".to_string(),
                source: e,
            })?;

        let url = self
            .storage
            .put_stream(&key, &media_type, Box::pin(file))
            .await
            .map_err(|e| AppError::Upload(e.to_string()))?;

        record.video_url = Some(url);
        record.updated_at = chrono::Utc::now();
        // Past this point the object exists; a publish failure leaves it
        // orphaned until the next successful retry overwrites the same key.
        self.records
            .update_video(&record)
            .await
            .map_err(|e| AppError::RecordUpdate(e.to_string()))?;

        tracing::info!(video_id = %video_id, key = %key, "Video ingestion completed");
        Ok(record)
    }
}
