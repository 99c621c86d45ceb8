pub mod launcher_profile;
pub mod maven_metadata;
pub mod version;

pub use launcher_profile::LauncherProfile;
pub use maven_metadata::MavenMetadata;
pub use version::{Channel, ChannelLists, VersionRecord};
