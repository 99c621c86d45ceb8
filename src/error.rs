use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Failed to fetch {url}: HTTP status {status}")]
    FetchStatus { url: String, status: u16 },

    #[error("Failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Failed to create version directory {path:?}: {source}")]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to download client configuration: {0}")]
    Download(String),

    #[error("Failed to create launcher profile: {0}")]
    ProfileWrite(String),

    #[error("Could not load any versions from the MeldMC repository")]
    NoVersionsAvailable,

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Task error: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid Input: {0}")]
    InvalidInput(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

impl AppError {
    /// True for errors raised while talking to the repository, before any
    /// response body was interpreted.
    pub fn is_fetch_error(&self) -> bool {
        matches!(self, AppError::FetchStatus { .. } | AppError::Fetch { .. })
    }

    /// HTTP status carried by a non-success response, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::FetchStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct CommandError {
    pub message: String,
    pub kind: String,
}

impl From<AppError> for CommandError {
    fn from(error: AppError) -> Self {
        CommandError {
            message: error.to_string(),
            kind: format!("{:?}", error),
        }
    }
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
