use axum::{
    body::Body,
    extract::{Path, State},
    http::{header::CONTENT_TYPE, HeaderMap},
    Json,
};
use futures::TryStreamExt;
use reelstore_core::models::VideoResponse;
use reelstore_core::AppError;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

/// Ingest an uploaded video for a catalog record.
///
/// The raw request body is the video stream; the Content-Type header declares
/// the container type. The whole pipeline is safe to retry: the stored object
/// key is deterministic per (record, orientation).
#[utoipa::path(
    post,
    path = "/api/videos/{video_id}/upload",
    tag = "videos",
    params(("video_id" = Uuid, Path, description = "Record to attach the video to")),
    request_body(content_type = "video/mp4", content = Vec<u8>),
    responses(
        (status = 200, description = "Video ingested and published", body = VideoResponse),
        (status = 400, description = "Invalid input or body over the size cap", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not the record owner", body = ErrorResponse),
        (status = 404, description = "Record not found", body = ErrorResponse),
        (status = 500, description = "Pipeline failure", body = ErrorResponse)
    )
)]
pub async fn upload_video(
    State(state): State<Arc<AppState>>,
    AuthUser(caller): AuthUser,
    Path(video_id): Path<Uuid>,
    headers: HeaderMap,
    body: Body,
) -> Result<Json<VideoResponse>, HttpAppError> {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::InvalidInput("missing Content-Type for video".to_string()))?
        .to_string();

    let stream = body.into_data_stream().map_err(std::io::Error::other);

    let record = state
        .orchestrator
        .ingest(video_id, caller, &content_type, stream)
        .await?;

    Ok(Json(VideoResponse::from(record)))
}
