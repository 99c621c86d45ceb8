pub mod download_utils; // HTTP source abstraction and file downloads
pub mod mc_utils; // .minecraft layout helpers
pub mod system_info;
