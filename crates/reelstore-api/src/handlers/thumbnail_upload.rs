use axum::{
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use reelstore_core::models::VideoResponse;
use reelstore_core::AppError;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

/// Keep the body-limit rejection distinguishable from a malformed form.
fn multipart_error(err: MultipartError) -> AppError {
    let message = err.to_string();
    if err.into_response().status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!("thumbnail exceeds the allowed size: {}", message))
    } else {
        AppError::InvalidInput(format!("unable to parse multipart form: {}", message))
    }
}

/// Attach a thumbnail to a catalog record.
///
/// Multipart form with a `thumbnail` field. Where the bytes end up (object
/// store vs inline data URL) is decided by the configured strategy.
#[utoipa::path(
    post,
    path = "/api/videos/{video_id}/thumbnail",
    tag = "videos",
    params(("video_id" = Uuid, Path, description = "Record to attach the thumbnail to")),
    request_body(content_type = "multipart/form-data", content = Vec<u8>),
    responses(
        (status = 200, description = "Thumbnail attached", body = VideoResponse),
        (status = 400, description = "Invalid input or thumbnail over the size cap", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not the record owner", body = ErrorResponse),
        (status = 404, description = "Record not found", body = ErrorResponse),
        (status = 500, description = "Storage or record failure", body = ErrorResponse)
    )
)]
pub async fn upload_thumbnail(
    State(state): State<Arc<AppState>>,
    AuthUser(caller): AuthUser,
    Path(video_id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<VideoResponse>, HttpAppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some("thumbnail") {
            continue;
        }

        let content_type = field
            .content_type()
            .ok_or_else(|| {
                AppError::InvalidInput("missing Content-Type for thumbnail".to_string())
            })?
            .to_string();

        let data = field.bytes().await.map_err(multipart_error)?.to_vec();

        let record = state
            .thumbnails
            .attach(video_id, caller, &content_type, data)
            .await?;

        return Ok(Json(VideoResponse::from(record)));
    }

    Err(AppError::InvalidInput("missing 'thumbnail' form field".to_string()).into())
}
