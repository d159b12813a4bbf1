//! Voxel volumes and physical size measurement.

use ndarray::parallel::prelude::*;
use ndarray::Array3;

use crate::{Error, Result};

/// Dense scalar volume with physical voxel spacing.
///
/// Voxels are indexed `(z, y, x)`; `spacing` and `origin` are given in
/// `(x, y, z)` order, matching the volume file header.
#[derive(Debug, Clone, PartialEq)]
pub struct Volume {
    voxels: Array3<f32>,
    spacing: [f64; 3],
    origin: [f64; 3],
}

impl Volume {
    /// Creates a volume at the origin.
    ///
    /// Fails if any spacing component is not finite and strictly positive.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSpacing`] for zero, negative or non-finite
    /// spacing.
    pub fn new(voxels: Array3<f32>, spacing: [f64; 3]) -> Result<Self> {
        if spacing.iter().any(|s| !s.is_finite() || *s <= 0.0) {
            return Err(Error::InvalidSpacing(spacing));
        }
        Ok(Self {
            voxels,
            spacing,
            origin: [0.0; 3],
        })
    }

    /// Sets the physical position of the first voxel.
    #[must_use]
    pub fn with_origin(mut self, origin: [f64; 3]) -> Self {
        self.origin = origin;
        self
    }

    /// Voxel data.
    #[must_use]
    pub fn voxels(&self) -> &Array3<f32> {
        &self.voxels
    }

    /// Voxel spacing `(x, y, z)`.
    #[must_use]
    pub fn spacing(&self) -> [f64; 3] {
        self.spacing
    }

    /// Physical origin `(x, y, z)`.
    #[must_use]
    pub fn origin(&self) -> [f64; 3] {
        self.origin
    }

    /// Grid dimensions `(z, y, x)`.
    #[must_use]
    pub fn dim(&self) -> (usize, usize, usize) {
        self.voxels.dim()
    }

    /// Physical volume of a single voxel.
    #[must_use]
    pub fn voxel_volume(&self) -> f64 {
        self.spacing.iter().product()
    }

    /// Number of non-zero voxels.
    #[allow(clippy::float_cmp)]
    #[must_use]
    pub fn foreground_count(&self) -> usize {
        self.voxels.par_iter().filter(|&&v| v != 0.0).count()
    }
}

/// Physical volume covered by the foreground of a binary mask.
///
/// Foreground voxel count times the spacing along each of the three axes, in
/// cubic length units of the spacing (mm^3 for CT data).
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn physical_size(mask: &Volume) -> f64 {
    mask.foreground_count() as f64 * mask.voxel_volume()
}
