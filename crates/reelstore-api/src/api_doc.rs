//! OpenAPI documentation for the HTTP surface.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::video_create::create_video,
        crate::handlers::video_get::get_video,
        crate::handlers::video_upload::upload_video,
        crate::handlers::thumbnail_upload::upload_thumbnail,
    ),
    components(schemas(
        reelstore_core::models::VideoResponse,
        crate::handlers::video_create::CreateVideoRequest,
        crate::error::ErrorResponse,
    )),
    tags((name = "videos", description = "Video catalog upload and retrieval"))
)]
pub struct ApiDoc;
