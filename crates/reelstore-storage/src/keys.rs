//! Shared key derivation for storage backends.
//!
//! Video key format: `{landscape|portrait|other}/{video_id}.mp4`.
//! Thumbnail key format: `thumbnails/{name}.{ext}`.

use reelstore_core::models::Orientation;
use uuid::Uuid;

/// Extension used for every stored video object. Only one video container
/// type is accepted on ingest, so the extension is fixed regardless of the
/// declared sub-type.
pub const VIDEO_EXTENSION: &str = "mp4";

/// Derive the storage key for a video asset.
///
/// Pure and deterministic: the same (id, orientation) always yields the same
/// key, so re-running ingestion overwrites the previous object instead of
/// orphaning it.
pub fn video_object_key(video_id: Uuid, orientation: Orientation) -> String {
    format!(
        "{}/{}.{}",
        orientation.key_prefix(),
        video_id,
        VIDEO_EXTENSION
    )
}

/// Derive the storage key for a thumbnail with an already-random name.
pub fn thumbnail_object_key(name: &str, extension: &str) -> String {
    format!("thumbnails/{}.{}", name, extension)
}
