use crate::error::{AppError, Result};
use crate::meld::api::MeldMavenApi;
use crate::meld::repository::MeldRepository;
use crate::meld::InstallationWorkflow;
use crate::state::config_state::ConfigManager;
use crate::state::event_state::EventState;
use crate::utils::download_utils::{HttpSource, ReqwestSource};
use log::{info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::OnceCell;

// Global state that will be initialized once
static INSTALLER_STATE: OnceCell<Arc<State>> = OnceCell::const_new();

pub struct State {
    pub config_manager: ConfigManager,
    pub http_source: Arc<dyn HttpSource>,
    repository_override: Option<String>,
    install_in_flight: Arc<AtomicBool>,
}

/// Held for the lifetime of one install; dropping it allows the next one.
pub struct InstallGuard {
    flag: Arc<AtomicBool>,
}

impl Drop for InstallGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl State {
    pub fn new(config_manager: ConfigManager, http_source: Arc<dyn HttpSource>) -> Self {
        Self {
            config_manager,
            http_source,
            repository_override: None,
            install_in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Uses `base_url` instead of the configured repository for this session
    /// only; the config file is left untouched.
    pub fn with_repository_override(mut self, base_url: Option<String>) -> Self {
        self.repository_override = base_url;
        self
    }

    /// Initializes the global state from the on-disk config and the shared
    /// HTTP client. A config that cannot be loaded falls back to defaults.
    pub async fn init(repository_override: Option<String>) -> Result<Arc<State>> {
        let state = INSTALLER_STATE
            .get_or_try_init(|| async move {
                info!("State::init - Initializing installer state...");
                let config_manager = ConfigManager::new();
                if let Err(e) = config_manager.load_config().await {
                    warn!("State::init - Failed to load config, using defaults: {}", e);
                }

                let state = State::new(config_manager, Arc::new(ReqwestSource::new()))
                    .with_repository_override(repository_override);
                info!("State::init - Installer state ready.");
                Ok::<Arc<State>, AppError>(Arc::new(state))
            })
            .await?;
        Ok(state.clone())
    }

    pub async fn repository(&self) -> MeldRepository {
        let config = self.config_manager.get_config().await;
        match &self.repository_override {
            Some(base_url) => MeldRepository::new(base_url, &config.artifact_path),
            None => config.repository(),
        }
    }

    pub async fn maven_api(&self) -> MeldMavenApi {
        MeldMavenApi::new(self.http_source.clone(), self.repository().await)
    }

    pub async fn installation_workflow(&self, events: EventState) -> InstallationWorkflow {
        InstallationWorkflow::new(self.http_source.clone(), self.repository().await, events)
    }

    /// Claims the single install slot.
    pub fn try_begin_install(&self) -> Result<InstallGuard> {
        self.install_in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| {
                AppError::InvalidOperation("An installation is already in progress".to_string())
            })?;
        Ok(InstallGuard {
            flag: self.install_in_flight.clone(),
        })
    }

    pub fn is_installing(&self) -> bool {
        self.install_in_flight.load(Ordering::Acquire)
    }
}
