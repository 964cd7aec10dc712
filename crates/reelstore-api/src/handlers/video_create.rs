use axum::{extract::State, Json};
use reelstore_core::models::VideoResponse;
use reelstore_core::AppError;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::auth::AuthUser;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateVideoRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Create a catalog record owned by the caller. Assets are attached by the
/// upload endpoints afterwards.
#[utoipa::path(
    post,
    path = "/api/videos",
    tag = "videos",
    request_body = CreateVideoRequest,
    responses(
        (status = 200, description = "Record created", body = VideoResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    )
)]
pub async fn create_video(
    State(state): State<Arc<AppState>>,
    AuthUser(caller): AuthUser,
    Json(request): Json<CreateVideoRequest>,
) -> Result<Json<VideoResponse>, HttpAppError> {
    let title = request.title.trim();
    if title.is_empty() {
        return Err(AppError::InvalidInput("title must not be empty".to_string()).into());
    }

    let record = state
        .records
        .create_video(caller, title, request.description.trim())
        .await?;

    tracing::info!(video_id = %record.id, "Video record created");
    Ok(Json(VideoResponse::from(record)))
}
