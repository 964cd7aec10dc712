pub mod thumbnail_upload;
pub mod video_create;
pub mod video_get;
pub mod video_upload;

pub use thumbnail_upload::upload_thumbnail;
pub use video_create::create_video;
pub use video_get::get_video;
pub use video_upload::upload_video;
