use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

pub const PROFILE_TYPE_CUSTOM: &str = "custom";
pub const PROFILE_ICON: &str = "Grass";

/// One entry under `profiles` in the vanilla launcher's `launcher_profiles.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LauncherProfile {
    pub name: String,
    #[serde(rename = "type")]
    pub profile_type: String,
    pub created: String,
    pub last_used: String,
    pub icon: String,
    pub last_version_id: String,
}

impl LauncherProfile {
    /// Custom profile pointing at an installed `versions/<last_version_id>`
    /// folder. Both timestamps are pinned to the epoch.
    pub fn custom(name: &str, last_version_id: &str) -> Self {
        let epoch = epoch_timestamp();
        Self {
            name: name.to_string(),
            profile_type: PROFILE_TYPE_CUSTOM.to_string(),
            created: epoch.clone(),
            last_used: epoch,
            icon: PROFILE_ICON.to_string(),
            last_version_id: last_version_id.to_string(),
        }
    }
}

/// `1970-01-01T00:00:00.000Z`
pub fn epoch_timestamp() -> String {
    DateTime::<Utc>::UNIX_EPOCH.to_rfc3339_opts(SecondsFormat::Millis, true)
}
