//! Reelstore API
//!
//! HTTP surface for the video catalog: JWT-authenticated video and thumbnail
//! uploads, video retrieval, and static serving of locally stored assets.

pub mod api_doc;
pub mod auth;
pub mod error;
pub mod handlers;
pub mod services;
pub mod setup;
pub mod state;
pub mod telemetry;
