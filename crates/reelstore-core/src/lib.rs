//! Reelstore Core Library
//!
//! Domain models, configuration, and the unified error type shared by every
//! reelstore crate. The record-store capability trait also lives here so that
//! the processing pipeline can depend on it without pulling in sqlx.

pub mod config;
pub mod error;
pub mod models;
pub mod record_store;

pub use config::{Config, StorageBackendKind, ThumbnailStrategy};
pub use error::{AppError, LogLevel};
pub use record_store::VideoRecordStore;
