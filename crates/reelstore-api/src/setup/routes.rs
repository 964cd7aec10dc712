use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Json, Router,
};
use reelstore_core::StorageBackendKind;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::api_doc::ApiDoc;
use crate::handlers::{create_video, get_video, upload_thumbnail, upload_video};
use crate::state::AppState;

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn build_router(state: Arc<AppState>) -> Router {
    // The services enforce the exact caps; the transport limits only need to
    // sit above them. The thumbnail route gets its own much smaller limit so
    // a hostile multipart body cannot buffer up to the video cap in memory.
    let body_limit = state.config.max_video_size_bytes + 1024;
    let thumbnail_body_limit = state.config.max_thumbnail_size_bytes + 1024;

    let mut router = Router::new()
        .route("/api/healthz", get(health))
        .route("/api-doc/openapi.json", get(openapi))
        .route("/api/videos", post(create_video))
        .route("/api/videos/{video_id}", get(get_video))
        .route("/api/videos/{video_id}/upload", post(upload_video))
        .route(
            "/api/videos/{video_id}/thumbnail",
            post(upload_thumbnail).layer(DefaultBodyLimit::max(thumbnail_body_limit)),
        );

    if state.config.storage_backend == StorageBackendKind::Local {
        router = router.nest_service("/assets", ServeDir::new(&state.config.assets_root));
    }

    router
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
