use crate::config::{DEFAULT_ARTIFACT_PATH, DEFAULT_REPOSITORY_BASE_URL, METADATA_FILE_NAME};
use crate::meld::dto::Channel;
use crate::utils::system_info::PlatformTag;

/// URL layout of the MeldMC maven repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeldRepository {
    base_url: String,
    artifact_path: String,
}

impl MeldRepository {
    pub fn new(base_url: &str, artifact_path: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            artifact_path: artifact_path.trim_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn channel_root(&self, channel: Channel) -> String {
        format!(
            "{}/{}/{}",
            self.base_url,
            channel.repository_path(),
            self.artifact_path
        )
    }

    /// `<base>/<channel>/<artifact>/maven-metadata.xml`
    pub fn metadata_url(&self, channel: Channel) -> String {
        format!("{}/{}", self.channel_root(channel), METADATA_FILE_NAME)
    }

    /// `<base>/<channel>/<artifact>/<id>/meldmc-<id>-client-<platform>.json`
    pub fn client_config_url(&self, channel: Channel, identifier: &str, platform: PlatformTag) -> String {
        format!(
            "{}/{id}/meldmc-{id}-client-{}.json",
            self.channel_root(channel),
            platform.as_str(),
            id = identifier
        )
    }
}

impl Default for MeldRepository {
    fn default() -> Self {
        Self::new(DEFAULT_REPOSITORY_BASE_URL, DEFAULT_ARTIFACT_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_metadata_urls() {
        let repository = MeldRepository::default();
        assert_eq!(
            repository.metadata_url(Channel::Release),
            "https://repo.coosanta.net/releases/net/coosanta/meldmc/maven-metadata.xml"
        );
        assert_eq!(
            repository.metadata_url(Channel::Snapshot),
            "https://repo.coosanta.net/snapshots/net/coosanta/meldmc/maven-metadata.xml"
        );
    }

    #[test]
    fn test_client_config_url_uses_channel_and_platform() {
        let repository = MeldRepository::new("http://localhost:8080/", "/net/coosanta/meldmc/");
        assert_eq!(
            repository.client_config_url(Channel::Snapshot, "1.2.0-SNAPSHOT-20240101", PlatformTag::MacAarch64),
            "http://localhost:8080/snapshots/net/coosanta/meldmc/1.2.0-SNAPSHOT-20240101/meldmc-1.2.0-SNAPSHOT-20240101-client-mac-aarch64.json"
        );
        assert_eq!(
            repository.client_config_url(Channel::Release, "1.2.0", PlatformTag::Windows),
            "http://localhost:8080/releases/net/coosanta/meldmc/1.2.0/meldmc-1.2.0-client-win.json"
        );
    }
}
