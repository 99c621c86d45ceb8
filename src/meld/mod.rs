pub mod api;
pub mod dto;
pub mod installer;
pub mod launcher_profiles;
pub mod repository;

pub use installer::{spawn_install, InstallOutcome, InstallationWorkflow};
pub use launcher_profiles::{upsert_profile, LauncherProfileStore};
pub use repository::MeldRepository;
