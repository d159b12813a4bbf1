//! Cache error types.

use thiserror::Error;

/// Result type for cache operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Cache error types.
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Imaging collaborator failure (unreadable source, codec error, ...).
    #[error("toolkit error: {0}")]
    Toolkit(#[from] segview_core::ToolkitError),

    /// Fingerprint manifest could not be read or written.
    #[error("manifest error: {0}")]
    Manifest(#[from] serde_json::Error),
}
