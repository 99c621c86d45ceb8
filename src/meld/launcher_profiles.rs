use crate::error::{AppError, Result};
use crate::meld::dto::LauncherProfile;
use crate::utils::mc_utils::{launcher_profiles_path, version_dir_name};
use log::{debug, info, warn};
use serde_json::{Map, Value};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

const PROFILES_KEY: &str = "profiles";
const BACKUP_EXTENSION: &str = "json.backup";

/// Read-modify-write access to the vanilla launcher's `launcher_profiles.json`.
///
/// The document is handled as untyped JSON so keys this installer knows
/// nothing about survive a round-trip, numbers keeping their original text.
pub struct LauncherProfileStore {
    path: PathBuf,
}

impl LauncherProfileStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn for_minecraft_dir(minecraft_dir: &Path) -> Self {
        Self::new(launcher_profiles_path(minecraft_dir))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the top-level object. A missing file is an empty document. An
    /// unreadable-as-JSON file is backed up and replaced by an empty document.
    pub async fn load_document(&self) -> Result<Map<String, Value>> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No launcher profiles at {:?}, starting fresh", self.path);
                return Ok(Map::new());
            }
            Err(e) => {
                return Err(AppError::ProfileWrite(format!(
                    "Failed to read {:?}: {}",
                    self.path, e
                )));
            }
        };

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Object(document)) => Ok(document),
            Ok(other) => {
                warn!(
                    "Launcher profiles at {:?} is not a JSON object (found {}), replacing it",
                    self.path,
                    json_kind(&other)
                );
                self.backup_unreadable().await;
                Ok(Map::new())
            }
            Err(e) => {
                warn!(
                    "Launcher profiles at {:?} could not be parsed ({}), replacing it",
                    self.path, e
                );
                self.backup_unreadable().await;
                Ok(Map::new())
            }
        }
    }

    async fn backup_unreadable(&self) {
        let backup_path = self.path.with_extension(BACKUP_EXTENSION);
        match fs::copy(&self.path, &backup_path).await {
            Ok(_) => info!("Backed up unreadable launcher profiles to {:?}", backup_path),
            Err(e) => warn!("Failed to back up launcher profiles: {}", e),
        }
    }

    /// Registers `profile_name` for the installed `version_identifier`,
    /// replacing any entry with the same name, and writes the whole document
    /// back pretty-printed.
    pub async fn upsert_profile(
        &self,
        profile_name: &str,
        version_identifier: &str,
    ) -> Result<LauncherProfile> {
        let mut document = self.load_document().await?;

        let profiles = document
            .entry(PROFILES_KEY)
            .or_insert_with(|| Value::Object(Map::new()));
        if !profiles.is_object() {
            warn!(
                "'{}' in {:?} is a {}, resetting it to an empty object",
                PROFILES_KEY,
                self.path,
                json_kind(profiles)
            );
            *profiles = Value::Object(Map::new());
        }

        let profile = LauncherProfile::custom(profile_name, &version_dir_name(version_identifier));
        let entry = serde_json::to_value(&profile)
            .map_err(|e| AppError::ProfileWrite(format!("Failed to serialize profile: {}", e)))?;

        if let Value::Object(profiles) = profiles {
            if profiles.insert(profile_name.to_string(), entry).is_some() {
                debug!("Replaced existing launcher profile '{}'", profile_name);
            }
        }

        let serialized = serde_json::to_string_pretty(&Value::Object(document))
            .map_err(|e| AppError::ProfileWrite(format!("Failed to serialize profiles: {}", e)))?;

        fs::write(&self.path, serialized).await.map_err(|e| {
            AppError::ProfileWrite(format!("Failed to write {:?}: {}", self.path, e))
        })?;

        info!(
            "Registered launcher profile '{}' -> {} in {:?}",
            profile_name, profile.last_version_id, self.path
        );
        Ok(profile)
    }
}

/// Convenience wrapper around [`LauncherProfileStore::upsert_profile`].
pub async fn upsert_profile(
    profile_document_path: &Path,
    profile_name: &str,
    version_identifier: &str,
) -> Result<LauncherProfile> {
    LauncherProfileStore::new(profile_document_path)
        .upsert_profile(profile_name, version_identifier)
        .await
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
