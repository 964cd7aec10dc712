//! Container inspection - stream geometry extraction and orientation
//! classification.
//!
//! The external probing capability (`ContainerProbe`) reports the geometry of
//! the container's video streams; `ContainerInspector` turns that into an
//! orientation classification. ffprobe is the production probe.

use async_trait::async_trait;
use reelstore_core::models::Orientation;
use reelstore_core::AppError;
use serde::Deserialize;
use std::path::Path;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;
use tokio::process::Command;

/// Width/height of one video stream as reported by the probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamGeometry {
    pub width: u32,
    pub height: u32,
}

/// Media-probing capability: report geometry for the video streams in a
/// container file.
#[async_trait]
pub trait ContainerProbe: Send + Sync {
    async fn probe(&self, path: &Path) -> Result<Vec<StreamGeometry>, AppError>;
}

/// Classifies a staged file's orientation from its first video stream.
#[derive(Clone)]
pub struct ContainerInspector {
    probe: Arc<dyn ContainerProbe>,
}

impl ContainerInspector {
    pub fn new(probe: Arc<dyn ContainerProbe>) -> Self {
        Self { probe }
    }

    /// Inspect a staged file and classify its orientation.
    ///
    /// Zero reported streams is a hard failure; no default orientation is
    /// guessed. Any reported geometry classifies - the three-way split is
    /// closed.
    pub async fn inspect(&self, path: &Path) -> Result<Orientation, AppError> {
        let streams = self.probe.probe(path).await?;
        let first = streams
            .first()
            .ok_or_else(|| AppError::Processing("no video stream found".to_string()))?;
        Ok(Orientation::classify(first.width, first.height))
    }
}

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    width: Option<u32>,
    height: Option<u32>,
}

/// Parse ffprobe `-print_format json -show_streams` output into geometries.
///
/// Streams without both dimensions (e.g. attached pictures) are skipped.
fn parse_probe_output(stdout: &[u8]) -> Result<Vec<StreamGeometry>, AppError> {
    let parsed: FfprobeOutput = serde_json::from_slice(stdout)
        .map_err(|e| AppError::Processing(format!("failed to parse ffprobe output: {}", e)))?;

    Ok(parsed
        .streams
        .into_iter()
        .filter_map(|s| match (s.width, s.height) {
            (Some(width), Some(height)) if width > 0 && height > 0 => {
                Some(StreamGeometry { width, height })
            }
            _ => None,
        })
        .collect())
}

/// ffprobe-backed probe with a bounded subprocess runtime.
pub struct FfprobeProbe {
    ffprobe_path: String,
    timeout: Duration,
}

impl FfprobeProbe {
    pub fn new(ffprobe_path: String, timeout: Duration) -> Self {
        Self {
            ffprobe_path,
            timeout,
        }
    }
}

#[async_trait]
impl ContainerProbe for FfprobeProbe {
    #[tracing::instrument(skip(self), fields(ffmpeg.operation = "probe"))]
    async fn probe(&self, path: &Path) -> Result<Vec<StreamGeometry>, AppError> {
        let start = std::time::Instant::now();

        let run = Command::new(&self.ffprobe_path)
            .args([
                "-v",
                "error",
                "-print_format",
                "json",
                "-show_streams",
                "-select_streams",
                "v",
            ])
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output();

        // On timeout the output future is dropped, which kills the child.
        let output = tokio::time::timeout(self.timeout, run)
            .await
            .map_err(|_| {
                AppError::Processing(format!(
                    "ffprobe timed out after {}s",
                    self.timeout.as_secs()
                ))
            })?
            .map_err(|e| AppError::Processing(format!("failed to execute ffprobe: {}", e)))?;

        if !output.status.success() {
            return Err(AppError::Processing(format!(
                "ffprobe failed: {}",
                String::from_utf8_lossy(&output.stderr)
            )));
        }

        let streams = parse_probe_output(&output.stdout)?;

        tracing::info!(
            path = %path.display(),
            stream_count = streams.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Container probe completed"
        );

        Ok(streams)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_geometry_from_ffprobe_json() {
        let json = br#"{"streams":[{"index":0,"codec_name":"h264","width":1280,"height":720}]}"#;
        let streams = parse_probe_output(json).expect("valid output");
        assert_eq!(
            streams,
            vec![StreamGeometry {
                width: 1280,
                height: 720
            }]
        );
    }

    #[test]
    fn empty_streams_parse_to_empty_list() {
        let streams = parse_probe_output(br#"{"streams":[]}"#).expect("valid output");
        assert!(streams.is_empty());

        // ffprobe omits the key entirely for some containers
        let streams = parse_probe_output(br#"{}"#).expect("valid output");
        assert!(streams.is_empty());
    }

    #[test]
    fn streams_without_dimensions_are_skipped() {
        let json = br#"{"streams":[{"codec_name":"mjpeg"},{"width":1080,"height":1920}]}"#;
        let streams = parse_probe_output(json).expect("valid output");
        assert_eq!(
            streams,
            vec![StreamGeometry {
                width: 1080,
                height: 1920
            }]
        );
    }

    #[test]
    fn malformed_output_is_a_processing_error() {
        let err = parse_probe_output(b"not json").expect_err("must fail");
        assert!(matches!(err, AppError::Processing(_)));
    }

    struct StaticProbe(Vec<StreamGeometry>);

    #[async_trait]
    impl ContainerProbe for StaticProbe {
        async fn probe(&self, _path: &Path) -> Result<Vec<StreamGeometry>, AppError> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn inspector_classifies_first_stream() {
        let inspector = ContainerInspector::new(Arc::new(StaticProbe(vec![
            StreamGeometry {
                width: 1920,
                height: 1080,
            },
            StreamGeometry {
                width: 100,
                height: 100,
            },
        ])));
        let orientation = inspector
            .inspect(Path::new("/tmp/clip.mp4"))
            .await
            .expect("classifies");
        assert_eq!(orientation, Orientation::Landscape);
    }

    #[tokio::test]
    async fn inspector_refuses_to_guess_without_streams() {
        let inspector = ContainerInspector::new(Arc::new(StaticProbe(vec![])));
        let err = inspector
            .inspect(Path::new("/tmp/clip.mp4"))
            .await
            .expect_err("zero streams must fail");
        assert!(matches!(err, AppError::Processing(msg) if msg.contains("no video stream")));
    }
}
