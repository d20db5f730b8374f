//! Errors raised by the dashboard shell.
//!
//! Lookup misses and empty search results are ordinary view states and never
//! surface here.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    /// Dataset file could not be read.
    #[error("failed to read dataset {path}: {source}")]
    ReadDataset {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Dataset JSON did not match the project schema.
    #[error("invalid dataset: {0}")]
    InvalidDataset(#[from] serde_json::Error),

    /// Two projects share an id.
    #[error("duplicate project id: {0}")]
    DuplicateProjectId(String),

    /// Progress outside 0..=100.
    #[error("project {id} has progress {progress}%, expected 0-100")]
    InvalidProgress { id: String, progress: u8 },

    /// Log file could not be created.
    #[error("failed to open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Terminal I/O failure.
    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
