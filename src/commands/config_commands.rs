use crate::error::{AppError, CommandError};
use crate::state::config_state::InstallerConfig;
use crate::state::State;
use log::{debug, info};
use std::path::PathBuf;

type Result<T> = std::result::Result<T, CommandError>;

/// Fields to change; `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct ConfigUpdate {
    pub repository_base_url: Option<String>,
    pub artifact_path: Option<String>,
    pub minecraft_directory: Option<PathBuf>,
    /// Drops the directory override so the platform default applies again.
    pub reset_minecraft_directory: bool,
}

pub async fn get_installer_config(state: &State) -> Result<InstallerConfig> {
    Ok(state.config_manager.get_config().await)
}

pub async fn set_installer_config(state: &State, config: InstallerConfig) -> Result<InstallerConfig> {
    let base_url = config.repository_base_url.trim();
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        return Err(CommandError::from(AppError::Config(format!(
            "Repository URL must start with http:// or https:// (got: {})",
            config.repository_base_url
        ))));
    }

    if config.artifact_path.trim().trim_matches('/').is_empty() {
        return Err(CommandError::from(AppError::Config(
            "Artifact path must not be empty".to_string(),
        )));
    }

    state.config_manager.set_config(config.clone()).await?;
    info!("Saved installer configuration to {:?}", state.config_manager.config_path());
    Ok(config)
}

/// Applies `update` on top of the saved config and persists the result.
pub async fn update_installer_config(state: &State, update: ConfigUpdate) -> Result<InstallerConfig> {
    debug!("Command called: update_installer_config {:?}", update);
    let mut config = get_installer_config(state).await?;

    if let Some(base_url) = update.repository_base_url {
        config.repository_base_url = base_url.trim().to_string();
    }
    if let Some(artifact_path) = update.artifact_path {
        config.artifact_path = artifact_path.trim().to_string();
    }
    if update.reset_minecraft_directory {
        config.minecraft_directory = None;
    } else if let Some(dir) = update.minecraft_directory {
        config.minecraft_directory = Some(dir);
    }

    set_installer_config(state, config).await
}

/// Directory pre-filled in the directory field: the configured override,
/// else the platform's `.minecraft`.
pub async fn get_default_minecraft_dir(state: &State) -> Result<Option<PathBuf>> {
    Ok(state.config_manager.get_config().await.minecraft_dir())
}
