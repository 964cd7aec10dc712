//! Reelstore Storage Library
//!
//! Object-storage abstraction and implementations. The `ObjectStorage` trait is
//! the "put object by key" capability consumed by the ingestion pipeline; S3
//! (via `object_store`) and the local filesystem implement it.
//!
//! # Key format
//!
//! Video objects live under an orientation-derived prefix:
//! `{landscape|portrait|other}/{video_id}.mp4`. Thumbnails live under
//! `thumbnails/{name}.{ext}`. Keys must not contain `..` or a leading `/`.
//! Key derivation is centralized in the `keys` module so all backends stay
//! consistent.

pub mod keys;
pub mod local;
pub mod s3;
pub mod traits;

pub use keys::{thumbnail_object_key, video_object_key};
pub use local::LocalStorage;
pub use s3::S3Storage;
pub use traits::{ObjectStorage, StorageError, StorageResult};
