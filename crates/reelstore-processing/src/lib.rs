//! Reelstore Processing Library
//!
//! The video ingestion pipeline: staging, container inspection, playback
//! preparation, and the orchestrator that sequences them against the storage
//! and record-store capabilities.

pub mod faststart;
pub mod ingest;
pub mod probe;
pub mod staging;

pub use faststart::{FaststartPreparer, PassthroughPreparer, PlaybackPreparer};
pub use ingest::{IngestConfig, IngestOrchestrator};
pub use probe::{ContainerInspector, ContainerProbe, FfprobeProbe, StreamGeometry};
pub use staging::StagedUpload;
