use log::{debug, info};
use tokio::sync::mpsc;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum EventType {
    LoadingVersions,
    VersionsLoaded,
    InstallStarted,
    DirectoriesCreated,
    DownloadingClientConfig,
    ClientConfigDownloaded,
    WritingProfile,
    InstallComplete,
    InstallFailed,
}

#[derive(Debug, Clone)]
pub struct EventPayload {
    pub event_id: Uuid,
    pub event_type: EventType,
    pub message: String,
    pub progress: Option<f64>,
    pub error: Option<String>,
}

pub type EventReceiver = mpsc::UnboundedReceiver<EventPayload>;

/// Sending half of the progress channel handed to background tasks. The
/// presentation side owns the matching [`EventReceiver`] and drains it on
/// its own schedule.
#[derive(Clone)]
pub struct EventState {
    sender: Option<mpsc::UnboundedSender<EventPayload>>,
}

impl EventState {
    pub fn new() -> (Self, EventReceiver) {
        let (sender, receiver) = mpsc::unbounded_channel();
        info!("Initialized event channel");
        (
            Self {
                sender: Some(sender),
            },
            receiver,
        )
    }

    /// An event state that drops everything, for callers with no observer.
    pub fn disabled() -> Self {
        Self { sender: None }
    }

    pub fn emit(&self, payload: EventPayload) {
        debug!(
            "[Event] {:?} {:?} {}",
            payload.event_type, payload.progress, payload.message
        );
        if let Some(sender) = &self.sender {
            if sender.send(payload).is_err() {
                debug!("[Event] Receiver dropped, event discarded");
            }
        }
    }

    pub fn emit_progress(&self, event_id: Uuid, event_type: EventType, message: &str, progress: f64) {
        self.emit(EventPayload {
            event_id,
            event_type,
            message: message.to_string(),
            progress: Some(progress),
            error: None,
        });
    }

    pub fn emit_error(&self, event_id: Uuid, event_type: EventType, message: &str, error: String) {
        self.emit(EventPayload {
            event_id,
            event_type,
            message: message.to_string(),
            progress: Some(0.0),
            error: Some(error),
        });
    }

    pub fn emit_message(&self, event_type: EventType, message: &str) {
        self.emit(EventPayload {
            event_id: Uuid::new_v4(),
            event_type,
            message: message.to_string(),
            progress: None,
            error: None,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_events_arrive_in_order() {
        let (events, mut receiver) = EventState::new();
        let event_id = Uuid::new_v4();

        events.emit_progress(event_id, EventType::InstallStarted, "Installing MeldMC...", 10.0);
        events.emit_error(event_id, EventType::InstallFailed, "Installation failed", "boom".into());
        drop(events);

        let first = receiver.recv().await.unwrap();
        assert_eq!(first.event_type, EventType::InstallStarted);
        assert_eq!(first.progress, Some(10.0));

        let second = receiver.recv().await.unwrap();
        assert_eq!(second.event_type, EventType::InstallFailed);
        assert_eq!(second.progress, Some(0.0));
        assert_eq!(second.error.as_deref(), Some("boom"));
        assert_eq!(second.event_id, event_id);

        assert!(receiver.recv().await.is_none());
    }

    #[test]
    fn test_emit_without_receiver_is_silent() {
        let (events, receiver) = EventState::new();
        drop(receiver);
        events.emit_message(EventType::LoadingVersions, "Loading versions...");
        EventState::disabled().emit_message(EventType::VersionsLoaded, "done");
    }
}
