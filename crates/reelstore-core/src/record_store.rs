//! Record-store capability.
//!
//! The relational store backing `VideoRecord` is an external collaborator of
//! the ingestion pipeline; this trait is the whole surface the pipeline
//! consumes. The sqlx implementation lives in `reelstore-db`.

use crate::error::AppError;
use crate::models::VideoRecord;
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait VideoRecordStore: Send + Sync {
    /// Create a record owned by `user_id`. Reference fields start unset;
    /// uploads attach them later.
    async fn create_video(
        &self,
        user_id: Uuid,
        title: &str,
        description: &str,
    ) -> Result<VideoRecord, AppError>;

    /// Fetch a record by id. `Ok(None)` means the id is unknown.
    async fn get_video(&self, id: Uuid) -> Result<Option<VideoRecord>, AppError>;

    /// Rewrite a record's mutable fields (title, description, reference URLs).
    async fn update_video(&self, record: &VideoRecord) -> Result<(), AppError>;
}
