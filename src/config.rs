use directories::ProjectDirs;
use once_cell::sync::Lazy;
use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;

/// Installer's own data directory (logs, config). `None` on hosts without a
/// resolvable home directory.
pub static INSTALLER_DIRECTORY: Lazy<Option<ProjectDirs>> =
    Lazy::new(|| ProjectDirs::from("net", "coosanta", "MeldMC-Installer"));

pub const DEFAULT_REPOSITORY_BASE_URL: &str = "https://repo.coosanta.net";
pub const DEFAULT_ARTIFACT_PATH: &str = "net/coosanta/meldmc";
pub const METADATA_FILE_NAME: &str = "maven-metadata.xml";

pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
pub const READ_TIMEOUT: Duration = Duration::from_secs(30);

static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

/// HTTP Client with installer agent and bounded connect/read timeouts
pub static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    reqwest::ClientBuilder::new()
        .user_agent(APP_USER_AGENT)
        .connect_timeout(CONNECT_TIMEOUT)
        .read_timeout(READ_TIMEOUT)
        .build()
        .unwrap_or_else(|e| {
            log::warn!("Failed to build configured HTTP client, using defaults: {}", e);
            Client::new()
        })
});

/// Root of the installer data directory, falling back to the working
/// directory when the platform gives us nothing.
pub fn installer_root_dir() -> PathBuf {
    match INSTALLER_DIRECTORY.as_ref() {
        Some(dirs) => dirs.data_dir().to_path_buf(),
        None => PathBuf::from("."),
    }
}
