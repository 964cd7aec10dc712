//! Wires configuration into the concrete services behind the capability
//! traits.

use anyhow::Context;
use reelstore_core::{Config, StorageBackendKind, ThumbnailStrategy, VideoRecordStore};
use reelstore_db::VideoRepository;
use reelstore_processing::{
    ContainerInspector, FaststartPreparer, FfprobeProbe, IngestConfig, IngestOrchestrator,
    PassthroughPreparer, PlaybackPreparer,
};
use reelstore_storage::{LocalStorage, ObjectStorage, S3Storage};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

use crate::auth::JwtService;
use crate::services::{InlineSink, ObjectStoreSink, ThumbnailService, ThumbnailSink};
use crate::state::AppState;

pub async fn build_state(config: Config, pool: PgPool) -> Result<Arc<AppState>, anyhow::Error> {
    let records: Arc<dyn VideoRecordStore> = Arc::new(VideoRepository::new(pool));

    let storage: Arc<dyn ObjectStorage> = match config.storage_backend {
        StorageBackendKind::S3 => {
            let bucket = config
                .s3_bucket
                .clone()
                .context("S3_BUCKET is required for the s3 backend")?;
            let region = config
                .s3_region
                .clone()
                .context("S3_REGION is required for the s3 backend")?;
            Arc::new(
                S3Storage::new(bucket, region, config.s3_endpoint.clone())
                    .context("failed to build S3 storage")?,
            )
        }
        StorageBackendKind::Local => Arc::new(
            LocalStorage::new(config.assets_root.clone(), config.assets_base_url.clone())
                .await
                .context("failed to build local storage")?,
        ),
    };

    tokio::fs::create_dir_all(&config.staging_dir)
        .await
        .context("failed to create staging directory")?;

    let probe = Arc::new(FfprobeProbe::new(
        config.ffprobe_path.clone(),
        Duration::from_secs(config.probe_timeout_secs),
    ));
    let preparer: Arc<dyn PlaybackPreparer> = if config.faststart_enabled {
        Arc::new(FaststartPreparer::new(
            config.ffmpeg_path.clone(),
            Duration::from_secs(config.prepare_timeout_secs),
        ))
    } else {
        Arc::new(PassthroughPreparer)
    };

    let orchestrator = IngestOrchestrator::new(
        records.clone(),
        storage.clone(),
        ContainerInspector::new(probe),
        preparer,
        IngestConfig {
            staging_dir: config.staging_dir.clone(),
            max_video_size_bytes: config.max_video_size_bytes as u64,
        },
    );

    let sink: Arc<dyn ThumbnailSink> = match config.thumbnail_strategy {
        ThumbnailStrategy::ObjectStore => Arc::new(ObjectStoreSink::new(storage.clone())),
        ThumbnailStrategy::Inline => Arc::new(InlineSink),
    };
    let thumbnails = ThumbnailService::new(records.clone(), sink, config.max_thumbnail_size_bytes);

    let jwt = JwtService::new(config.jwt_secret.clone(), config.jwt_expiry_hours);

    Ok(Arc::new(AppState {
        config,
        records,
        orchestrator,
        thumbnails,
        jwt,
    }))
}
