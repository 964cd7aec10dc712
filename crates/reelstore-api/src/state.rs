//! Application state, constructed once at startup and shared by reference.

use reelstore_core::{Config, VideoRecordStore};
use reelstore_processing::IngestOrchestrator;
use std::sync::Arc;

use crate::auth::JwtService;
use crate::services::ThumbnailService;

pub struct AppState {
    pub config: Config,
    pub records: Arc<dyn VideoRecordStore>,
    pub orchestrator: IngestOrchestrator,
    pub thumbnails: ThumbnailService,
    pub jwt: JwtService,
}
