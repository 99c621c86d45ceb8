use crate::utils::system_info::{OperatingSystem, OS};
use log::warn;
use std::env;
use std::path::{Path, PathBuf};

pub const LAUNCHER_PROFILES_FILE: &str = "launcher_profiles.json";
pub const VERSIONS_DIR: &str = "versions";

/// Returns the path to the default .minecraft directory for the running OS
pub fn get_default_minecraft_dir() -> Option<PathBuf> {
    default_minecraft_dir_for(OS, env::var_os("APPDATA").map(PathBuf::from), dirs::home_dir())
}

fn default_minecraft_dir_for(
    os: OperatingSystem,
    app_data: Option<PathBuf>,
    home: Option<PathBuf>,
) -> Option<PathBuf> {
    match os {
        OperatingSystem::WINDOWS => match app_data {
            // Windows: %APPDATA%\.minecraft
            Some(app_data) => Some(app_data.join(".minecraft")),
            None => {
                warn!("[MC Utils] APPDATA is not set, falling back to the user profile");
                home.map(|home| home.join("AppData").join("Roaming").join(".minecraft"))
            }
        },
        // macOS: ~/Library/Application Support/minecraft
        OperatingSystem::OSX => home.map(|home| {
            home.join("Library")
                .join("Application Support")
                .join("minecraft")
        }),
        OperatingSystem::LINUX | OperatingSystem::UNKNOWN => {
            home.map(|home| home.join(".minecraft"))
        }
    }
}

/// Folder name the launcher uses for an installed MeldMC build.
pub fn version_dir_name(identifier: &str) -> String {
    format!("meldmc-{}", identifier)
}

/// `<minecraft_dir>/versions/meldmc-<identifier>`
pub fn version_dir(minecraft_dir: &Path, identifier: &str) -> PathBuf {
    minecraft_dir
        .join(VERSIONS_DIR)
        .join(version_dir_name(identifier))
}

/// `<version_dir>/meldmc-<identifier>.json`
pub fn client_config_path(version_dir: &Path, identifier: &str) -> PathBuf {
    version_dir.join(format!("{}.json", version_dir_name(identifier)))
}

pub fn launcher_profiles_path(minecraft_dir: &Path) -> PathBuf {
    minecraft_dir.join(LAUNCHER_PROFILES_FILE)
}
