use crate::config::{installer_root_dir, DEFAULT_ARTIFACT_PATH, DEFAULT_REPOSITORY_BASE_URL};
use crate::error::{AppError, Result};
use crate::meld::repository::MeldRepository;
use crate::utils::mc_utils;
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::{Mutex, RwLock};

const CONFIG_FILENAME: &str = "installer_config.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallerConfig {
    #[serde(default = "default_repository_base_url")]
    pub repository_base_url: String,
    #[serde(default = "default_artifact_path")]
    pub artifact_path: String,
    /// Overrides the platform's default `.minecraft` location.
    #[serde(default)]
    pub minecraft_directory: Option<PathBuf>,
}

fn default_repository_base_url() -> String {
    DEFAULT_REPOSITORY_BASE_URL.to_string()
}

fn default_artifact_path() -> String {
    DEFAULT_ARTIFACT_PATH.to_string()
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            repository_base_url: default_repository_base_url(),
            artifact_path: default_artifact_path(),
            minecraft_directory: None,
        }
    }
}

impl InstallerConfig {
    pub fn repository(&self) -> MeldRepository {
        MeldRepository::new(&self.repository_base_url, &self.artifact_path)
    }

    pub fn minecraft_dir(&self) -> Option<PathBuf> {
        self.minecraft_directory
            .clone()
            .or_else(mc_utils::get_default_minecraft_dir)
    }
}

pub struct ConfigManager {
    config: Arc<RwLock<InstallerConfig>>,
    config_path: PathBuf,
    save_lock: Mutex<()>,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::with_path(installer_root_dir().join(CONFIG_FILENAME))
    }

    pub fn with_path<P: Into<PathBuf>>(config_path: P) -> Self {
        let config_path = config_path.into();
        info!("ConfigManager: Initializing with path: {:?}", config_path);
        Self {
            config: Arc::new(RwLock::new(InstallerConfig::default())),
            config_path,
            save_lock: Mutex::new(()),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Loads the config file, writing defaults when it does not exist yet.
    /// An unparseable file is backed up and replaced by defaults.
    pub async fn load_config(&self) -> Result<()> {
        if !self.config_path.exists() {
            info!("Config file not found, using default configuration");
            self.save_config().await?;
            return Ok(());
        }

        info!("Loading installer configuration from: {:?}", self.config_path);
        let config_data = fs::read_to_string(&self.config_path).await?;

        match serde_json::from_str::<InstallerConfig>(&config_data) {
            Ok(loaded_config) => {
                debug!("Loaded config: {:?}", loaded_config);
                *self.config.write().await = loaded_config;
            }
            Err(e) => {
                error!("Failed to parse config file: {}", e);
                let backup_path = self.config_path.with_extension("json.backup");
                match fs::copy(&self.config_path, &backup_path).await {
                    Ok(_) => info!("Created config backup at: {:?}", backup_path),
                    Err(backup_err) => warn!("Failed to create config backup: {}", backup_err),
                }

                *self.config.write().await = InstallerConfig::default();
                self.save_config().await?;
            }
        }

        Ok(())
    }

    pub async fn save_config(&self) -> Result<()> {
        let _guard = self.save_lock.lock().await;

        if let Some(parent) = self.config_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let config = self.config.read().await.clone();
        let config_data = serde_json::to_string_pretty(&config)?;
        fs::write(&self.config_path, config_data).await.map_err(|e| {
            AppError::Config(format!("Failed to write {:?}: {}", self.config_path, e))
        })?;

        debug!("Saved installer configuration to {:?}", self.config_path);
        Ok(())
    }

    pub async fn get_config(&self) -> InstallerConfig {
        self.config.read().await.clone()
    }

    pub async fn set_config(&self, new_config: InstallerConfig) -> Result<()> {
        *self.config.write().await = new_config;
        self.save_config().await
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_config_is_written_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_path(dir.path().join("nested").join(CONFIG_FILENAME));

        manager.load_config().await.unwrap();

        assert!(manager.config_path().exists());
        assert_eq!(manager.get_config().await, InstallerConfig::default());
    }

    #[tokio::test]
    async fn test_partial_config_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, r#"{"repository_base_url": "http://mirror.local/"}"#).unwrap();
        let manager = ConfigManager::with_path(&path);

        manager.load_config().await.unwrap();
        let config = manager.get_config().await;

        assert_eq!(config.artifact_path, DEFAULT_ARTIFACT_PATH);
        assert_eq!(config.minecraft_directory, None);
        assert_eq!(
            config.repository().metadata_url(crate::meld::dto::Channel::Release),
            "http://mirror.local/releases/net/coosanta/meldmc/maven-metadata.xml"
        );
    }

    #[tokio::test]
    async fn test_corrupt_config_is_backed_up() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "{{{").unwrap();
        let manager = ConfigManager::with_path(&path);

        manager.load_config().await.unwrap();

        assert_eq!(manager.get_config().await, InstallerConfig::default());
        let backup = dir.path().join("installer_config.json.backup");
        assert_eq!(std::fs::read_to_string(backup).unwrap(), "{{{");
    }

    #[tokio::test]
    async fn test_minecraft_directory_override() {
        let config = InstallerConfig {
            minecraft_directory: Some(PathBuf::from("/srv/mc")),
            ..InstallerConfig::default()
        };
        assert_eq!(config.minecraft_dir(), Some(PathBuf::from("/srv/mc")));
    }
}
