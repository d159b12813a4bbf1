//! Deterministic artifact file layout.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use segview_core::LabelValue;
use serde::Serialize;

/// Files derived for one label value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactPaths {
    /// Binary mask volume, `segment_<label>.nrrd`.
    pub mask: PathBuf,
    /// Polygon mesh, `polydata_mesh_<label>.vtp`.
    pub mesh: PathBuf,
    /// STL export, `output_mesh_<label>.stl`.
    pub stl: PathBuf,
    /// Source fingerprint, `segment_<label>.manifest.json`.
    pub manifest: PathBuf,
}

impl ArtifactPaths {
    /// Paths of the artifacts for `label` inside `output_dir`.
    #[must_use]
    pub fn for_label(output_dir: &Path, label: LabelValue) -> Self {
        Self {
            mask: output_dir.join(format!("segment_{label}.nrrd")),
            mesh: output_dir.join(format!("polydata_mesh_{label}.vtp")),
            stl: output_dir.join(format!("output_mesh_{label}.stl")),
            manifest: output_dir.join(format!("segment_{label}.manifest.json")),
        }
    }

    /// The three derived artifacts in pipeline order.
    #[must_use]
    pub fn artifacts(&self) -> [&Path; 3] {
        [&self.mask, &self.mesh, &self.stl]
    }

    /// Deletes the artifacts and the manifest, skipping missing files.
    ///
    /// Returns the number of files removed.
    ///
    /// # Errors
    ///
    /// Returns the first I/O error other than a missing file.
    pub fn remove(&self) -> io::Result<usize> {
        let mut removed = 0;
        for path in self.artifacts().into_iter().chain([self.manifest.as_path()]) {
            match fs::remove_file(path) {
                Ok(()) => removed += 1,
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e),
            }
        }
        Ok(removed)
    }
}
