use crate::error::{AppError, CommandError};
use crate::meld::dto::{Channel, ChannelLists, VersionRecord};
use crate::meld::{spawn_install, InstallOutcome};
use crate::state::event_state::{EventReceiver, EventState};
use crate::state::State;
use log::{debug, info};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinHandle;

type Result<T> = std::result::Result<T, CommandError>;

/// What the user picked. `None` fields fall back to the latest version of
/// the channel and the default Minecraft directory.
#[derive(Debug, Clone)]
pub struct InstallRequest {
    pub channel: Channel,
    pub version: Option<String>,
    pub minecraft_dir: Option<PathBuf>,
}

/// A running install: progress arrives on `events`, the outcome on `task`.
pub struct InstallHandle {
    pub version: VersionRecord,
    pub minecraft_dir: PathBuf,
    pub events: EventReceiver,
    pub task: JoinHandle<Result<InstallOutcome>>,
}

/// Turns a request into a concrete version and directory.
pub fn resolve_install_target(
    lists: &ChannelLists,
    request: &InstallRequest,
    default_dir: Option<PathBuf>,
) -> Result<(VersionRecord, PathBuf)> {
    let minecraft_dir = request
        .minecraft_dir
        .clone()
        .or(default_dir)
        .filter(|dir| !dir.as_os_str().to_string_lossy().trim().is_empty())
        .ok_or_else(|| {
            AppError::InvalidInput("Please select a Minecraft directory".to_string())
        })?;

    let version = match request.version.as_deref() {
        Some(identifier) => lists.find(request.channel, identifier).ok_or_else(|| {
            AppError::InvalidInput(format!(
                "Version '{}' is not available on the {} channel",
                identifier.trim(),
                request.channel
            ))
        })?,
        None => lists
            .latest(request.channel)
            .ok_or_else(|| AppError::InvalidInput("Please select a version".to_string()))?,
    };

    Ok((version.clone(), minecraft_dir))
}

/// Starts an install in the background. Only one install may run at a time;
/// the slot is released when the task finishes, whatever the outcome.
pub async fn start_install(
    state: &State,
    version: VersionRecord,
    minecraft_dir: PathBuf,
) -> Result<InstallHandle> {
    debug!("Command called: start_install {} -> {:?}", version, minecraft_dir);
    let guard = state.try_begin_install()?;

    let (events, receiver) = EventState::new();
    let workflow = Arc::new(state.installation_workflow(events).await);
    let install = spawn_install(workflow, version.clone(), minecraft_dir.clone());

    let task = tokio::spawn(async move {
        let _guard = guard;
        match install.await {
            Ok(result) => result.map_err(CommandError::from),
            Err(join_error) => Err(CommandError::from(AppError::Task(join_error))),
        }
    });

    info!("Started installation of MeldMC {}", version);
    Ok(InstallHandle {
        version,
        minecraft_dir,
        events: receiver,
        task,
    })
}
