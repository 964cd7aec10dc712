pub mod thumbnail;

pub use thumbnail::{InlineSink, ObjectStoreSink, ThumbnailService, ThumbnailSink};
