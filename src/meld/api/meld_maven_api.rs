use crate::error::{AppError, Result};
use crate::meld::dto::{Channel, ChannelLists, MavenMetadata, VersionRecord};
use crate::meld::repository::MeldRepository;
use crate::utils::download_utils::HttpSource;
use log::{debug, error, info};
use std::sync::Arc;

/// Reads version listings from the MeldMC repository. Nothing is cached
/// between calls.
pub struct MeldMavenApi {
    source: Arc<dyn HttpSource>,
    repository: MeldRepository,
}

impl MeldMavenApi {
    pub fn new(source: Arc<dyn HttpSource>, repository: MeldRepository) -> Self {
        Self { source, repository }
    }

    pub fn repository(&self) -> &MeldRepository {
        &self.repository
    }

    /// Fetches the metadata document at `url` and returns its versions tagged
    /// with `channel`, latest first.
    pub async fn fetch_channel_from(&self, url: &str, channel: Channel) -> Result<Vec<VersionRecord>> {
        debug!("Fetching {} metadata from: {}", channel, url);

        let body = self.source.get_bytes(url).await?;
        let xml_content = String::from_utf8(body).map_err(|e| {
            AppError::ParseError(format!("Metadata from {} is not valid UTF-8: {}", url, e))
        })?;

        let metadata = MavenMetadata::parse(&xml_content)?;
        let records = metadata.to_records(channel);

        info!("Successfully fetched {} {} versions", records.len(), channel);
        Ok(records)
    }

    pub async fn fetch_channel(&self, channel: Channel) -> Result<Vec<VersionRecord>> {
        let url = self.repository.metadata_url(channel);
        self.fetch_channel_from(&url, channel).await
    }

    /// Fetches both channels concurrently. A failing channel is logged and
    /// comes back empty without affecting the other one.
    pub async fn load_channels(&self) -> ChannelLists {
        let (releases, snapshots) = tokio::join!(
            self.fetch_channel(Channel::Release),
            self.fetch_channel(Channel::Snapshot)
        );

        ChannelLists {
            releases: Self::or_empty(Channel::Release, releases),
            snapshots: Self::or_empty(Channel::Snapshot, snapshots),
        }
    }

    fn or_empty(channel: Channel, result: Result<Vec<VersionRecord>>) -> Vec<VersionRecord> {
        result.unwrap_or_else(|e| {
            error!("Failed to load {} versions: {}", channel, e);
            Vec::new()
        })
    }
}
