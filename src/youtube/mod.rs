pub mod client;
pub mod errors;
pub mod types;
pub mod video_id;

pub use client::YouTubeClient;
pub use errors::YouTubeError;
pub use video_id::{extract_video_id, VideoId};
