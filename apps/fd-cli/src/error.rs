//! Error types for the fd-cli front end.

use std::path::PathBuf;

/// CLI error type wrapping errors from the backend crates and from
/// manifest handling.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Failed to read manifest file: {path}")]
    ManifestRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse manifest: {0}")]
    ManifestParse(#[from] serde_yaml::Error),

    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Graph error: {0}")]
    Core(#[from] fd_core::FdError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CliResult<T> = Result<T, CliError>;
