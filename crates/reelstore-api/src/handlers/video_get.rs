use axum::{
    extract::{Path, State},
    Json,
};
use reelstore_core::models::VideoResponse;
use reelstore_core::AppError;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

/// Fetch a catalog record, including any published references.
#[utoipa::path(
    get,
    path = "/api/videos/{video_id}",
    tag = "videos",
    params(("video_id" = Uuid, Path, description = "Record id")),
    responses(
        (status = 200, description = "Video record", body = VideoResponse),
        (status = 404, description = "Record not found", body = ErrorResponse)
    )
)]
pub async fn get_video(
    State(state): State<Arc<AppState>>,
    Path(video_id): Path<Uuid>,
) -> Result<Json<VideoResponse>, HttpAppError> {
    let record = state
        .records
        .get_video(video_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("video {} not found", video_id)))?;

    Ok(Json(VideoResponse::from(record)))
}
