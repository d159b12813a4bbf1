//! Imaging collaborator interface.
//!
//! Thresholding, isosurface extraction and the NRRD/VTP/STL codecs are
//! provided by an external imaging library. Implementations of
//! [`ImagingToolkit`] adapt such a library; everything else in the workspace
//! only talks to this trait.

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

use crate::{PolyMesh, Volume};

/// Encoding used when writing STL meshes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StlEncoding {
    /// Binary STL (compact, the default for exports).
    #[default]
    Binary,
    /// ASCII STL.
    Ascii,
}

/// Failure reported by the imaging collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{operation} failed: {message}")]
pub struct ToolkitError {
    /// Toolkit operation that failed (`read_volume`, `marching_cubes`, ...).
    pub operation: &'static str,
    /// Library-provided description.
    pub message: String,
}

impl ToolkitError {
    /// Creates a toolkit error for `operation`.
    #[must_use]
    pub fn new(operation: &'static str, message: impl Into<String>) -> Self {
        Self {
            operation,
            message: message.into(),
        }
    }

    /// Wraps an I/O failure on `path`.
    #[must_use]
    pub fn io(operation: &'static str, path: &Path, err: &std::io::Error) -> Self {
        Self::new(operation, format!("{}: {err}", path.display()))
    }
}

/// Volume and mesh operations delegated to an imaging library.
///
/// Implementations must be usable from background workers, hence
/// `Send + Sync`.
pub trait ImagingToolkit: Send + Sync {
    /// Reads a volumetric image (NRRD).
    fn read_volume(&self, path: &Path) -> Result<Volume, ToolkitError>;

    /// Writes a volumetric image (NRRD), optionally compressed.
    fn write_volume(&self, volume: &Volume, path: &Path, compress: bool)
        -> Result<(), ToolkitError>;

    /// Binary threshold: voxels in `[lower, upper]` become 1, all others 0.
    /// Spacing and origin are preserved.
    fn binary_threshold(
        &self,
        volume: &Volume,
        lower: f64,
        upper: f64,
    ) -> Result<Volume, ToolkitError>;

    /// Isosurface extraction (marching cubes) at `iso_value`.
    fn marching_cubes(&self, volume: &Volume, iso_value: f64) -> Result<PolyMesh, ToolkitError>;

    /// Reads a polygon mesh (XML VTP).
    fn read_mesh(&self, path: &Path) -> Result<PolyMesh, ToolkitError>;

    /// Writes a polygon mesh (XML VTP).
    fn write_mesh(&self, mesh: &PolyMesh, path: &Path) -> Result<(), ToolkitError>;

    /// Writes a triangle mesh as STL.
    fn write_stl(
        &self,
        mesh: &PolyMesh,
        path: &Path,
        encoding: StlEncoding,
    ) -> Result<(), ToolkitError>;
}

impl<T: ImagingToolkit + ?Sized> ImagingToolkit for Arc<T> {
    fn read_volume(&self, path: &Path) -> Result<Volume, ToolkitError> {
        (**self).read_volume(path)
    }

    fn write_volume(
        &self,
        volume: &Volume,
        path: &Path,
        compress: bool,
    ) -> Result<(), ToolkitError> {
        (**self).write_volume(volume, path, compress)
    }

    fn binary_threshold(
        &self,
        volume: &Volume,
        lower: f64,
        upper: f64,
    ) -> Result<Volume, ToolkitError> {
        (**self).binary_threshold(volume, lower, upper)
    }

    fn marching_cubes(&self, volume: &Volume, iso_value: f64) -> Result<PolyMesh, ToolkitError> {
        (**self).marching_cubes(volume, iso_value)
    }

    fn read_mesh(&self, path: &Path) -> Result<PolyMesh, ToolkitError> {
        (**self).read_mesh(path)
    }

    fn write_mesh(&self, mesh: &PolyMesh, path: &Path) -> Result<(), ToolkitError> {
        (**self).write_mesh(mesh, path)
    }

    fn write_stl(
        &self,
        mesh: &PolyMesh,
        path: &Path,
        encoding: StlEncoding,
    ) -> Result<(), ToolkitError> {
        (**self).write_stl(mesh, path, encoding)
    }
}
