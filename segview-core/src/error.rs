//! Error types for segview-core.

use thiserror::Error;

use crate::toolkit::ToolkitError;

/// Result type alias for segview core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for segview operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Label value that cannot name a segment (NaN or infinite).
    #[error("invalid label value: {0}")]
    InvalidLabel(f64),

    /// Voxel spacing must be finite and strictly positive on every axis.
    #[error("invalid voxel spacing: {0:?}")]
    InvalidSpacing([f64; 3]),

    /// Mesh references a point index past the end of the point list.
    #[error("triangle {triangle} references point {index}, mesh has {points} points")]
    InvalidMeshIndex {
        triangle: usize,
        index: u32,
        points: usize,
    },

    /// Failure reported by the imaging collaborator.
    #[error("toolkit error: {0}")]
    Toolkit(#[from] ToolkitError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    ConfigError(String),
}
