use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackerError {
    /// Stored state exists but cannot be parsed. Callers that load at
    /// startup recover from this by treating the store as empty.
    #[error("Could not read stored data from {path:?}: {reason}")]
    StorageRead { path: PathBuf, reason: String },

    #[error("Could not write {path:?}: {source}")]
    StorageWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Remote sync failed: {0}")]
    Sync(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TrackerError>;
