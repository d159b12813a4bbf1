//! Application error types.

use thiserror::Error;

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    /// Viewer or slot failure.
    #[error("render error: {0}")]
    Render(#[from] segview_render::RenderError),

    /// Derived-artifact pipeline failure.
    #[error("{0}")]
    Cache(#[from] segview_cache::Error),

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed configuration document.
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),

    /// Number of display surfaces does not match the configured grid.
    #[error("{surfaces} display surfaces for a {rows}x{cols} viewport grid")]
    GridMismatch {
        surfaces: usize,
        rows: usize,
        cols: usize,
    },

    /// Segment action requested before any CT volume is known.
    #[error("no CT volume loaded")]
    NoSource,

    /// A background job is still running.
    #[error("a segment job is already running")]
    Busy,
}
