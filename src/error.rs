//! Error types for quicksave rotation and quickload
//!
//! Every failure is absorbed at the boundary where it happens and turned into
//! a notification; these types carry the reason to logs and outcomes.

use std::path::PathBuf;

/// Failure reading or writing a settings source
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("settings file {path} is malformed: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("settings source '{0}' is unavailable")]
    Unavailable(String),
}

/// Failure talking to the save store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("save store I/O: {0}")]
    Io(#[from] std::io::Error),
    #[error("save document is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("save '{0}' not found")]
    NotFound(String),
    #[error("cannot list saves: {0}")]
    Listing(String),
    #[error("'{0}' is not a valid save name")]
    InvalidName(String),
}

/// Quicksave failure taxonomy
#[derive(Debug, thiserror::Error)]
pub enum QuicksaveError {
    #[error("configuration unavailable: {0}")]
    ConfigUnavailable(#[from] ConfigError),
    #[error(transparent)]
    StoreUnavailable(#[from] StoreError),
    #[error("quicksave name pattern is invalid: {0}")]
    Pattern(#[from] regex::Error),
    #[error("unable to load quicksave: {}", .0.join("; "))]
    LoadUnsuccessful(Vec<String>),
    #[error("mission is not null, failed to quickload")]
    UnsafeApplyConflict,
    #[error("quickload failed: {0}")]
    LoadApplyFailed(String),
}

pub type QuicksaveResult<T> = Result<T, QuicksaveError>;
