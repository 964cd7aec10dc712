//! Upload staging - durable temporary storage for a not-yet-classified body.
//!
//! A staged upload is an exclusively owned temp file in the shared staging
//! directory. Names are unique per run, so concurrent ingestions need no
//! locking. The file is removed when the `StagedUpload` is dropped, on every
//! exit path of the pipeline.

use bytes::Bytes;
use futures::{Stream, StreamExt};
use reelstore_core::AppError;
use std::path::Path;
use tempfile::TempPath;
use tokio::io::AsyncWriteExt;

/// An exclusively-owned staged upload on local durable storage.
///
/// Removal on drop is the pipeline's cleanup guarantee; it holds for success,
/// every failure, and caller disconnects.
#[derive(Debug)]
pub struct StagedUpload {
    path: TempPath,
    size: u64,
}

impl StagedUpload {
    /// Stream the request body into a uniquely named file under `staging_dir`,
    /// enforcing `max_bytes` as the bytes arrive.
    ///
    /// A chunk that would push the total past the cap fails the stage before
    /// the chunk is written, and the partial file is removed. Transport errors
    /// (including a caller disconnect mid-body) surface as `Staging`.
    pub async fn receive<S>(
        staging_dir: &Path,
        max_bytes: u64,
        mut body: S,
    ) -> Result<Self, AppError>
    where
        S: Stream<Item = Result<Bytes, std::io::Error>> + Send + Unpin,
    {
        let staging_err = |message: &str, source: std::io::Error| AppError::Staging {
            message: message.to_string(),
            source,
        };

        let temp = tempfile::Builder::new()
            .prefix("ingest-")
            .suffix(".mp4")
            .tempfile_in(staging_dir)
            .map_err(|e| staging_err("failed to create staging file", e))?;
        let path = temp.into_temp_path();

        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .open(&path)
            .await
            .map_err(|e| staging_err("failed to open staging file", e))?;

        let mut size: u64 = 0;
        while let Some(chunk) = body.next().await {
            let chunk = chunk.map_err(|e| staging_err("request body read failed", e))?;
            if size + chunk.len() as u64 > max_bytes {
                return Err(AppError::PayloadTooLarge(format!(
                    "upload exceeds the {} byte limit",
                    max_bytes
                )));
            }
            file.write_all(&chunk)
                .await
                .map_err(|e| staging_err("failed to write staging file", e))?;
            size += chunk.len() as u64;
        }

        file.sync_all()
            .await
            .map_err(|e| staging_err("failed to sync staging file", e))?;

        tracing::debug!(
            path = %path.display(),
            size_bytes = size,
            "Upload staged"
        );

        Ok(StagedUpload { path, size })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn size(&self) -> u64 {
        self.size
    }
}
