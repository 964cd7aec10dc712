//! Configuration module
//!
//! A single `Config` struct constructed once at process start (from the
//! environment, with `.env` support) and passed by `Arc` into the server
//! state. Handlers never read ambient globals.

use std::env;
use std::path::PathBuf;

const MAX_VIDEO_SIZE_BYTES: usize = 1 << 30; // 1 GiB
const MAX_THUMBNAIL_SIZE_BYTES: usize = 10 << 20; // 10 MiB
const JWT_EXPIRY_HOURS: i64 = 24;
const PROBE_TIMEOUT_SECS: u64 = 30;
const PREPARE_TIMEOUT_SECS: u64 = 120;

/// Which object-storage backend serves uploaded assets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageBackendKind {
    S3,
    Local,
}

/// How uploaded thumbnails are persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThumbnailStrategy {
    /// Write bytes to the object store and publish its URL.
    ObjectStore,
    /// Base64-encode the bytes into a data URL stored on the record itself.
    Inline,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
    // Storage
    pub storage_backend: StorageBackendKind,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    /// Custom endpoint for S3-compatible providers (MinIO, DigitalOcean Spaces, ...)
    pub s3_endpoint: Option<String>,
    pub assets_root: PathBuf,
    pub assets_base_url: String,
    // Ingestion
    pub staging_dir: PathBuf,
    pub max_video_size_bytes: usize,
    pub max_thumbnail_size_bytes: usize,
    pub ffprobe_path: String,
    pub ffmpeg_path: String,
    pub probe_timeout_secs: u64,
    pub prepare_timeout_secs: u64,
    /// When false, playback preparation is the identity pass-through
    /// (for hosts without ffmpeg).
    pub faststart_enabled: bool,
    pub thumbnail_strategy: ThumbnailStrategy,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let storage_backend = match env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "s3".to_string())
            .to_lowercase()
            .as_str()
        {
            "s3" => StorageBackendKind::S3,
            "local" => StorageBackendKind::Local,
            other => {
                return Err(anyhow::anyhow!(
                    "STORAGE_BACKEND must be 's3' or 'local', got '{}'",
                    other
                ))
            }
        };

        let s3_bucket = env::var("S3_BUCKET").ok();
        let s3_region = env::var("S3_REGION").ok();
        if storage_backend == StorageBackendKind::S3 && (s3_bucket.is_none() || s3_region.is_none())
        {
            return Err(anyhow::anyhow!(
                "S3_BUCKET and S3_REGION must be set when STORAGE_BACKEND=s3"
            ));
        }

        let thumbnail_strategy = match env::var("THUMBNAIL_STRATEGY")
            .unwrap_or_else(|_| "object-store".to_string())
            .to_lowercase()
            .as_str()
        {
            "object-store" => ThumbnailStrategy::ObjectStore,
            "inline" => ThumbnailStrategy::Inline,
            other => {
                return Err(anyhow::anyhow!(
                    "THUMBNAIL_STRATEGY must be 'object-store' or 'inline', got '{}'",
                    other
                ))
            }
        };

        Ok(Config {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| "4000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            jwt_secret: env::var("JWT_SECRET")
                .map_err(|_| anyhow::anyhow!("JWT_SECRET must be set for authentication"))?,
            jwt_expiry_hours: env::var("JWT_EXPIRY_HOURS")
                .unwrap_or_else(|_| JWT_EXPIRY_HOURS.to_string())
                .parse()
                .unwrap_or(JWT_EXPIRY_HOURS),
            storage_backend,
            s3_bucket,
            s3_region,
            s3_endpoint: env::var("S3_ENDPOINT").ok(),
            assets_root: env::var("ASSETS_ROOT")
                .unwrap_or_else(|_| "./assets".to_string())
                .into(),
            assets_base_url: env::var("ASSETS_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:4000/assets".to_string()),
            staging_dir: env::var("STAGING_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| env::temp_dir()),
            max_video_size_bytes: env::var("MAX_VIDEO_SIZE_BYTES")
                .unwrap_or_else(|_| MAX_VIDEO_SIZE_BYTES.to_string())
                .parse()
                .unwrap_or(MAX_VIDEO_SIZE_BYTES),
            max_thumbnail_size_bytes: env::var("MAX_THUMBNAIL_SIZE_BYTES")
                .unwrap_or_else(|_| MAX_THUMBNAIL_SIZE_BYTES.to_string())
                .parse()
                .unwrap_or(MAX_THUMBNAIL_SIZE_BYTES),
            ffprobe_path: env::var("FFPROBE_PATH").unwrap_or_else(|_| "ffprobe".to_string()),
            ffmpeg_path: env::var("FFMPEG_PATH").unwrap_or_else(|_| "ffmpeg".to_string()),
            probe_timeout_secs: env::var("PROBE_TIMEOUT_SECS")
                .unwrap_or_else(|_| PROBE_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(PROBE_TIMEOUT_SECS),
            prepare_timeout_secs: env::var("PREPARE_TIMEOUT_SECS")
                .unwrap_or_else(|_| PREPARE_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(PREPARE_TIMEOUT_SECS),
            faststart_enabled: env::var("FASTSTART_ENABLED")
                .unwrap_or_else(|_| "true".to_string())
                .to_lowercase()
                .parse()
                .unwrap_or(true),
            thumbnail_strategy,
        })
    }
}
