//! Render error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::BackendError;

/// Result type for render operations.
pub type Result<T> = std::result::Result<T, RenderError>;

/// Render error types.
#[derive(Error, Debug)]
pub enum RenderError {
    /// A slot manager needs at least one surface.
    #[error("no display surfaces supplied")]
    NoSurfaces,

    /// Slot index outside `[0, slots)`.
    #[error("invalid slot index {index}, {slots} slots available")]
    InvalidSlotIndex { index: usize, slots: usize },

    /// Render requested before its input was set.
    #[error("no {0} set")]
    MissingInput(&'static str),

    /// Source volume path does not exist.
    #[error("source file not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// Visualization library failure.
    #[error("backend error: {0}")]
    Backend(#[from] BackendError),
}
