//! The derived-artifact pipeline: mask, mesh, STL.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use segview_core::{ImagingToolkit, LabelValue, PolyMesh, StlEncoding, Volume};
use serde::Serialize;

use crate::{ArtifactPaths, CachePolicy, Error, Result, SourceFingerprint};

/// Isosurface level used on binary masks (foreground voxels are 1).
pub const MASK_ISO_VALUE: f64 = 1.0;

/// On-disk state of the artifacts for one label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactStatus {
    /// Label value, formatted as in the file names.
    pub label: String,
    /// Artifact locations.
    pub paths: ArtifactPaths,
    /// Mask file present.
    pub mask: bool,
    /// Mesh file present.
    pub mesh: bool,
    /// STL file present.
    pub stl: bool,
    /// Whether the recorded fingerprint matches the source. `None` when no
    /// manifest was recorded or the source cannot be inspected.
    pub fresh: Option<bool>,
}

impl ArtifactStatus {
    /// Inspects the artifacts of `label` in `output_dir`.
    ///
    /// Freshness is only checked when `source` is given.
    ///
    /// # Errors
    ///
    /// Returns an error only if the output directory cannot be inspected.
    pub fn inspect(output_dir: &Path, source: Option<&Path>, label: LabelValue) -> Result<Self> {
        let paths = ArtifactPaths::for_label(output_dir, label);
        let fresh = match recorded_fingerprint(&paths)? {
            Recorded::Valid(recorded) => source
                .and_then(|source| SourceFingerprint::of(source, label).ok())
                .map(|current| current == recorded),
            Recorded::Missing => None,
            Recorded::Unreadable => Some(false),
        };
        Ok(Self {
            label: label.to_string(),
            mask: paths.mask.exists(),
            mesh: paths.mesh.exists(),
            stl: paths.stl.exists(),
            fresh,
            paths,
        })
    }

    /// All three artifacts present.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.mask && self.mesh && self.stl
    }
}

/// Manifest state of one label.
enum Recorded {
    Valid(SourceFingerprint),
    Missing,
    /// Torn or corrupt manifest; never matches.
    Unreadable,
}

fn recorded_fingerprint(paths: &ArtifactPaths) -> Result<Recorded> {
    match SourceFingerprint::load(&paths.manifest) {
        Ok(Some(recorded)) => Ok(Recorded::Valid(recorded)),
        Ok(None) => Ok(Recorded::Missing),
        Err(Error::Manifest(e)) => {
            warn!("unreadable manifest {}: {e}", paths.manifest.display());
            Ok(Recorded::Unreadable)
        }
        Err(e) => Err(e),
    }
}

/// Memoized `source -> mask -> mesh -> STL` pipeline for one source volume.
pub struct ArtifactCache<T> {
    toolkit: T,
    source: PathBuf,
    output_dir: PathBuf,
    policy: CachePolicy,
}

impl<T: ImagingToolkit> ArtifactCache<T> {
    /// Creates a cache deriving from `source` into `output_dir`, using the
    /// presence policy.
    #[must_use]
    pub fn new(toolkit: T, source: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            toolkit,
            source: source.into(),
            output_dir: output_dir.into(),
            policy: CachePolicy::default(),
        }
    }

    /// Sets the reuse policy.
    #[must_use]
    pub fn with_policy(mut self, policy: CachePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Imaging collaborator.
    #[must_use]
    pub fn toolkit(&self) -> &T {
        &self.toolkit
    }

    /// Source label volume.
    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Directory holding the derived artifacts.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Reuse policy.
    #[must_use]
    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    /// Artifact paths for `label`.
    #[must_use]
    pub fn paths(&self, label: LabelValue) -> ArtifactPaths {
        ArtifactPaths::for_label(&self.output_dir, label)
    }

    /// Returns the binary mask isolating `label` in `source_volume`.
    ///
    /// Thresholds and writes a compressed mask when none is cached, otherwise
    /// reads the cached one.
    ///
    /// # Errors
    ///
    /// Returns toolkit failures and I/O errors creating the output directory.
    pub fn ensure_mask(&self, source_volume: &Volume, label: LabelValue) -> Result<Volume> {
        let paths = self.checked_paths(label)?;
        if paths.mask.exists() {
            debug!("reusing mask {}", paths.mask.display());
            return Ok(self.toolkit.read_volume(&paths.mask)?);
        }
        self.compute_mask(source_volume, label, &paths)
    }

    /// Like [`ensure_mask`](Self::ensure_mask), reading the source volume
    /// only if the mask has to be computed.
    ///
    /// # Errors
    ///
    /// Returns a toolkit error if the source volume cannot be read.
    pub fn ensure_mask_from_source(&self, label: LabelValue) -> Result<Volume> {
        let paths = self.checked_paths(label)?;
        self.mask_from_source(label, &paths)
    }

    /// Returns the polygon mesh of `label`.
    ///
    /// When no mesh is cached the mask is obtained (computed if needed),
    /// isosurfaced at [`MASK_ISO_VALUE`] and the mesh written.
    ///
    /// # Errors
    ///
    /// Returns toolkit failures of any stage that has to run.
    pub fn ensure_mesh(&self, label: LabelValue) -> Result<PolyMesh> {
        let paths = self.checked_paths(label)?;
        self.mesh_for(label, &paths)
    }

    /// Makes sure the binary STL export of `label` exists and returns its
    /// path. Missing upstream artifacts are computed first.
    ///
    /// # Errors
    ///
    /// Returns toolkit failures of any stage that has to run.
    pub fn ensure_stl(&self, label: LabelValue) -> Result<PathBuf> {
        let paths = self.checked_paths(label)?;
        if paths.stl.exists() {
            debug!("reusing STL {}", paths.stl.display());
            return Ok(paths.stl);
        }
        let mesh = self.mesh_for(label, &paths)?;
        self.toolkit
            .write_stl(&mesh, &paths.stl, StlEncoding::Binary)?;
        info!(
            "wrote STL {} ({} triangles)",
            paths.stl.display(),
            mesh.triangle_count()
        );
        Ok(paths.stl)
    }

    /// Reports which artifacts exist for `label` and whether they match the
    /// current source.
    ///
    /// # Errors
    ///
    /// See [`ArtifactStatus::inspect`].
    pub fn status(&self, label: LabelValue) -> Result<ArtifactStatus> {
        ArtifactStatus::inspect(&self.output_dir, Some(&self.source), label)
    }

    /// Deletes every artifact (and the manifest) of `label`.
    ///
    /// Returns the number of files removed.
    ///
    /// # Errors
    ///
    /// Returns the first I/O error other than a missing file.
    pub fn invalidate(&self, label: LabelValue) -> Result<usize> {
        let removed = self.paths(label).remove()?;
        if removed > 0 {
            info!("invalidated {removed} artifacts for label {label}");
        }
        Ok(removed)
    }

    /// Paths for `label` after enforcing the reuse policy.
    fn checked_paths(&self, label: LabelValue) -> Result<ArtifactPaths> {
        let paths = self.paths(label);
        if self.policy == CachePolicy::Fingerprint {
            let current = SourceFingerprint::of(&self.source, label)?;
            let matches = match recorded_fingerprint(&paths)? {
                Recorded::Valid(recorded) => recorded == current,
                Recorded::Missing | Recorded::Unreadable => false,
            };
            let has_artifacts = paths.artifacts().iter().any(|p| p.exists());
            if has_artifacts && !matches {
                warn!(
                    "artifacts for label {label} do not match {}, recomputing",
                    self.source.display()
                );
                self.invalidate(label)?;
            }
        }
        Ok(paths)
    }

    fn mask_from_source(&self, label: LabelValue, paths: &ArtifactPaths) -> Result<Volume> {
        if paths.mask.exists() {
            debug!("reusing mask {}", paths.mask.display());
            return Ok(self.toolkit.read_volume(&paths.mask)?);
        }
        let source_volume = self.toolkit.read_volume(&self.source)?;
        self.compute_mask(&source_volume, label, paths)
    }

    fn compute_mask(
        &self,
        source_volume: &Volume,
        label: LabelValue,
        paths: &ArtifactPaths,
    ) -> Result<Volume> {
        let mask = self
            .toolkit
            .binary_threshold(source_volume, label.get(), label.get())?;
        fs::create_dir_all(&self.output_dir)?;
        self.toolkit.write_volume(&mask, &paths.mask, true)?;
        if self.policy == CachePolicy::Fingerprint {
            SourceFingerprint::of(&self.source, label)?.save(&paths.manifest)?;
        }
        info!("extracted mask {}", paths.mask.display());
        Ok(mask)
    }

    fn mesh_for(&self, label: LabelValue, paths: &ArtifactPaths) -> Result<PolyMesh> {
        if paths.mesh.exists() {
            debug!("reusing mesh {}", paths.mesh.display());
            return Ok(self.toolkit.read_mesh(&paths.mesh)?);
        }
        let mask = self.mask_from_source(label, paths)?;
        let mesh = self.toolkit.marching_cubes(&mask, MASK_ISO_VALUE)?;
        fs::create_dir_all(&self.output_dir)?;
        self.toolkit.write_mesh(&mesh, &paths.mesh)?;
        info!(
            "wrote mesh {} ({} triangles)",
            paths.mesh.display(),
            mesh.triangle_count()
        );
        Ok(mesh)
    }
}
