use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A catalog video record.
///
/// Created by the record store before any upload happens. The reference fields
/// (`thumbnail_url`, `video_url`) are set only after the corresponding asset
/// has been durably stored; the ingestion pipeline never publishes a reference
/// to bytes that were not fully uploaded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VideoRecord {
    pub id: Uuid,
    /// Owning subject; only this user may upload assets for the record.
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub thumbnail_url: Option<String>,
    pub video_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VideoResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub thumbnail_url: Option<String>,
    pub video_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<VideoRecord> for VideoResponse {
    fn from(v: VideoRecord) -> Self {
        VideoResponse {
            id: v.id,
            user_id: v.user_id,
            title: v.title,
            description: v.description,
            thumbnail_url: v.thumbnail_url,
            video_url: v.video_url,
            created_at: v.created_at,
            updated_at: v.updated_at,
        }
    }
}
