use crate::error::{AppError, CommandError};
use crate::meld::dto::ChannelLists;
use crate::state::event_state::{EventState, EventType};
use crate::state::State;
use log::{debug, info};

type Result<T> = std::result::Result<T, CommandError>;

/// Loads both channel lists. Fails only when neither channel produced a
/// single version.
pub async fn get_versions(state: &State, events: &EventState) -> Result<ChannelLists> {
    debug!("Command called: get_versions");
    events.emit_message(EventType::LoadingVersions, "Loading versions...");

    let lists = state.maven_api().await.load_channels().await;

    if lists.is_empty() {
        debug!("Command failed: get_versions");
        return Err(CommandError::from(AppError::NoVersionsAvailable));
    }

    info!(
        "Loaded {} release and {} snapshot versions",
        lists.releases.len(),
        lists.snapshots.len()
    );
    events.emit_message(EventType::VersionsLoaded, "Versions loaded successfully");
    Ok(lists)
}
