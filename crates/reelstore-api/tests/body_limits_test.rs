//! Route-level body limit behavior: the thumbnail route must reject oversized
//! bodies at its own small limit instead of inheriting the video cap.

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use reelstore_api::setup::{build_router, build_state};
use reelstore_core::{Config, StorageBackendKind, ThumbnailStrategy};
use sqlx::postgres::PgPoolOptions;
use tempfile::TempDir;
use tower::ServiceExt;
use uuid::Uuid;

const MAX_VIDEO_BYTES: usize = 1 << 20;
const MAX_THUMBNAIL_BYTES: usize = 1024;

struct TestApp {
    router: Router,
    token: String,
    _assets: TempDir,
    _staging: TempDir,
}

async fn test_app() -> TestApp {
    let assets = tempfile::tempdir().expect("assets dir");
    let staging = tempfile::tempdir().expect("staging dir");

    let config = Config {
        server_port: 0,
        database_url: "postgres://localhost/unused".to_string(),
        jwt_secret: "test-secret".to_string(),
        jwt_expiry_hours: 1,
        storage_backend: StorageBackendKind::Local,
        s3_bucket: None,
        s3_region: None,
        s3_endpoint: None,
        assets_root: assets.path().to_path_buf(),
        assets_base_url: "http://localhost:4000/assets".to_string(),
        staging_dir: staging.path().to_path_buf(),
        max_video_size_bytes: MAX_VIDEO_BYTES,
        max_thumbnail_size_bytes: MAX_THUMBNAIL_BYTES,
        ffprobe_path: "ffprobe".to_string(),
        ffmpeg_path: "ffmpeg".to_string(),
        probe_timeout_secs: 5,
        prepare_timeout_secs: 5,
        faststart_enabled: false,
        thumbnail_strategy: ThumbnailStrategy::Inline,
    };

    // Lazy pool: these requests are rejected before any query runs.
    let pool = PgPoolOptions::new()
        .connect_lazy(&config.database_url)
        .expect("lazy pool");

    let state = build_state(config, pool).await.expect("state");
    let token = state
        .jwt
        .issue_token(Uuid::new_v4())
        .expect("token for test user");
    let router = build_router(state);

    TestApp {
        router,
        token,
        _assets: assets,
        _staging: staging,
    }
}

async fn error_code(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body");
    let json: serde_json::Value = serde_json::from_slice(&bytes).expect("error json");
    json["code"].as_str().expect("code field").to_string()
}

#[tokio::test]
async fn thumbnail_route_rejects_bodies_over_its_own_limit() {
    let app = test_app().await;

    // Well over the thumbnail limit, well under the video cap.
    let body = vec![b'a'; 8 * 1024];
    let request = Request::builder()
        .method("POST")
        .uri(format!("/api/videos/{}/thumbnail", Uuid::new_v4()))
        .header(header::AUTHORIZATION, format!("Bearer {}", app.token))
        .header(
            header::CONTENT_TYPE,
            "multipart/form-data; boundary=XBOUNDARY",
        )
        .body(Body::from(body))
        .expect("request");

    let response = app.router.oneshot(request).await.expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_code(response).await, "PAYLOAD_TOO_LARGE");
}

#[tokio::test]
async fn video_route_keeps_the_larger_limit() {
    let app = test_app().await;

    // The same 8 KiB body passes the video route's transport limit and gets
    // rejected by the content-type gate instead.
    let body = vec![b'a'; 8 * 1024];
    let request = Request::builder()
        .method("POST")
        .uri(format!("/api/videos/{}/upload", Uuid::new_v4()))
        .header(header::AUTHORIZATION, format!("Bearer {}", app.token))
        .header(header::CONTENT_TYPE, "video/webm")
        .body(Body::from(body))
        .expect("request");

    let response = app.router.oneshot(request).await.expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_code(response).await, "INVALID_INPUT");
}
