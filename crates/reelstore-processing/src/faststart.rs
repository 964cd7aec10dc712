//! Playback preparation - relocating the MP4 index for progressive playback.
//!
//! A freshly muxed MP4 usually carries its `moov` atom at the end of the file,
//! which forces a player to fetch everything before rendering. The preparer
//! remuxes the container with the index up front. Contract for every
//! implementation: the input file is untouched and still valid afterwards, the
//! returned path may equal the input, and the caller cleans up whichever path
//! is distinct from the input.

use async_trait::async_trait;
use reelstore_core::AppError;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

#[async_trait]
pub trait PlaybackPreparer: Send + Sync {
    async fn prepare(&self, input: &Path) -> Result<PathBuf, AppError>;
}

/// ffmpeg `-movflags +faststart` remux with a bounded subprocess runtime.
pub struct FaststartPreparer {
    ffmpeg_path: String,
    timeout: Duration,
}

impl FaststartPreparer {
    pub fn new(ffmpeg_path: String, timeout: Duration) -> Self {
        Self {
            ffmpeg_path,
            timeout,
        }
    }

    fn output_path(input: &Path) -> PathBuf {
        let mut name = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "staged".to_string());
        name.push_str(".faststart.mp4");
        input.with_file_name(name)
    }
}

#[async_trait]
impl PlaybackPreparer for FaststartPreparer {
    #[tracing::instrument(skip(self), fields(ffmpeg.operation = "faststart"))]
    async fn prepare(&self, input: &Path) -> Result<PathBuf, AppError> {
        let output_path = Self::output_path(input);
        let start = std::time::Instant::now();

        let run = Command::new(&self.ffmpeg_path)
            .args(["-y", "-i"])
            .arg(input)
            .args(["-c", "copy", "-movflags", "+faststart", "-f", "mp4"])
            .arg(&output_path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output();

        let result = tokio::time::timeout(self.timeout, run).await;

        let output = match result {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                let _ = tokio::fs::remove_file(&output_path).await;
                return Err(AppError::Processing(format!(
                    "failed to execute ffmpeg: {}",
                    e
                )));
            }
            Err(_) => {
                let _ = tokio::fs::remove_file(&output_path).await;
                return Err(AppError::Processing(format!(
                    "ffmpeg timed out after {}s",
                    self.timeout.as_secs()
                )));
            }
        };

        if !output.status.success() {
            let _ = tokio::fs::remove_file(&output_path).await;
            return Err(AppError::Processing(format!(
                "ffmpeg faststart failed: {}",
                String::from_utf8_lossy(&output.stderr)
            )));
        }

        tracing::info!(
            input = %input.display(),
            output = %output_path.display(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Faststart remux completed"
        );

        Ok(output_path)
    }
}

/// Identity pass-through for hosts without ffmpeg. Returns the input path
/// unchanged, so the caller has no extra artifact to clean up.
pub struct PassthroughPreparer;

#[async_trait]
impl PlaybackPreparer for PassthroughPreparer {
    async fn prepare(&self, input: &Path) -> Result<PathBuf, AppError> {
        Ok(input.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_path_is_a_distinct_sibling() {
        let input = Path::new("/tmp/staging/ingest-abc123.mp4");
        let output = FaststartPreparer::output_path(input);
        assert_eq!(
            output,
            Path::new("/tmp/staging/ingest-abc123.faststart.mp4")
        );
        assert_ne!(output, input);
        assert_eq!(output.parent(), input.parent());
    }

    #[tokio::test]
    async fn passthrough_returns_input_unchanged() {
        let input = Path::new("/tmp/staging/ingest-abc123.mp4");
        let output = PassthroughPreparer
            .prepare(input)
            .await
            .expect("passthrough never fails");
        assert_eq!(output, input);
    }
}
