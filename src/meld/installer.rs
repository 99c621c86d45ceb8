use crate::error::{AppError, Result};
use crate::meld::dto::VersionRecord;
use crate::meld::launcher_profiles::LauncherProfileStore;
use crate::meld::repository::MeldRepository;
use crate::state::event_state::{EventState, EventType};
use crate::utils::download_utils::{DownloadUtils, HttpSource};
use crate::utils::mc_utils;
use crate::utils::system_info::PlatformTag;
use log::{error, info};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::task::JoinHandle;
use uuid::Uuid;

pub const PROGRESS_STARTED: f64 = 10.0;
pub const PROGRESS_DIRECTORIES_CREATED: f64 = 30.0;
pub const PROGRESS_DOWNLOAD_STARTED: f64 = 50.0;
pub const PROGRESS_DOWNLOAD_COMPLETE: f64 = 70.0;
pub const PROGRESS_PROFILE_STARTED: f64 = 90.0;
pub const PROGRESS_COMPLETE: f64 = 100.0;

/// What a successful install left on disk.
#[derive(Debug, Clone)]
pub struct InstallOutcome {
    pub version: VersionRecord,
    pub platform: PlatformTag,
    pub version_dir: PathBuf,
    pub client_config_path: PathBuf,
    pub profile_name: String,
    pub bytes_downloaded: u64,
}

/// Installs one MeldMC version into a `.minecraft` directory.
///
/// Steps run strictly in order and the first failure ends the install.
/// Nothing already written is rolled back.
pub struct InstallationWorkflow {
    source: Arc<dyn HttpSource>,
    repository: MeldRepository,
    platform: PlatformTag,
    events: EventState,
}

impl InstallationWorkflow {
    pub fn new(source: Arc<dyn HttpSource>, repository: MeldRepository, events: EventState) -> Self {
        Self {
            source,
            repository,
            platform: PlatformTag::current(),
            events,
        }
    }

    pub fn with_platform(mut self, platform: PlatformTag) -> Self {
        self.platform = platform;
        self
    }

    pub fn platform(&self) -> PlatformTag {
        self.platform
    }

    pub async fn install(&self, version: &VersionRecord, minecraft_dir: &Path) -> Result<InstallOutcome> {
        let event_id = Uuid::new_v4();
        info!(
            "Installing MeldMC {} ({}) into {:?} for platform {}",
            version, version.channel(), minecraft_dir, self.platform
        );

        match self.run_steps(event_id, version, minecraft_dir).await {
            Ok(outcome) => {
                self.events.emit_progress(
                    event_id,
                    EventType::InstallComplete,
                    "MeldMC installed successfully!",
                    PROGRESS_COMPLETE,
                );
                info!("Installed MeldMC {} into {:?}", version, outcome.version_dir);
                Ok(outcome)
            }
            Err(e) => {
                error!("Installation of MeldMC {} failed: {}", version, e);
                self.events.emit_error(
                    event_id,
                    EventType::InstallFailed,
                    "Installation failed",
                    e.to_string(),
                );
                Err(e)
            }
        }
    }

    async fn run_steps(
        &self,
        event_id: Uuid,
        version: &VersionRecord,
        minecraft_dir: &Path,
    ) -> Result<InstallOutcome> {
        if minecraft_dir.as_os_str().is_empty() {
            return Err(AppError::InvalidInput(
                "Please select a Minecraft directory".to_string(),
            ));
        }

        self.events.emit_progress(
            event_id,
            EventType::InstallStarted,
            "Installing MeldMC...",
            PROGRESS_STARTED,
        );

        let identifier = version.identifier();
        let version_dir = mc_utils::version_dir(minecraft_dir, identifier);
        fs::create_dir_all(&version_dir)
            .await
            .map_err(|source| AppError::DirectoryCreation {
                path: version_dir.clone(),
                source,
            })?;
        self.events.emit_progress(
            event_id,
            EventType::DirectoriesCreated,
            "Created version directory",
            PROGRESS_DIRECTORIES_CREATED,
        );

        let client_url = self
            .repository
            .client_config_url(version.channel(), identifier, self.platform);
        let client_config_path = mc_utils::client_config_path(&version_dir, identifier);
        self.events.emit_progress(
            event_id,
            EventType::DownloadingClientConfig,
            "Downloading client configuration...",
            PROGRESS_DOWNLOAD_STARTED,
        );
        let bytes_downloaded =
            DownloadUtils::download_file(self.source.as_ref(), &client_url, &client_config_path)
                .await?;
        self.events.emit_progress(
            event_id,
            EventType::ClientConfigDownloaded,
            "Downloaded client configuration",
            PROGRESS_DOWNLOAD_COMPLETE,
        );

        self.events.emit_progress(
            event_id,
            EventType::WritingProfile,
            "Creating launcher profile...",
            PROGRESS_PROFILE_STARTED,
        );
        let profile_name = version.profile_name();
        LauncherProfileStore::for_minecraft_dir(minecraft_dir)
            .upsert_profile(&profile_name, identifier)
            .await?;

        Ok(InstallOutcome {
            version: version.clone(),
            platform: self.platform,
            version_dir,
            client_config_path,
            profile_name,
            bytes_downloaded,
        })
    }
}

/// Runs the install on the tokio runtime. Progress flows through the
/// workflow's event channel, the outcome through the returned handle.
pub fn spawn_install(
    workflow: Arc<InstallationWorkflow>,
    version: VersionRecord,
    minecraft_dir: PathBuf,
) -> JoinHandle<Result<InstallOutcome>> {
    tokio::spawn(async move { workflow.install(&version, &minecraft_dir).await })
}
