//! Triangle mesh container shared between the cache and the viewer.

use crate::{Error, Result};

/// Triangle mesh produced by isosurface extraction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolyMesh {
    points: Vec<[f32; 3]>,
    triangles: Vec<[u32; 3]>,
}

impl PolyMesh {
    /// Creates a mesh, checking every triangle index against the point list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMeshIndex`] for the first out-of-range index.
    pub fn new(points: Vec<[f32; 3]>, triangles: Vec<[u32; 3]>) -> Result<Self> {
        for (triangle, tri) in triangles.iter().enumerate() {
            if let Some(&index) = tri.iter().find(|&&i| i as usize >= points.len()) {
                return Err(Error::InvalidMeshIndex {
                    triangle,
                    index,
                    points: points.len(),
                });
            }
        }
        Ok(Self { points, triangles })
    }

    /// Creates an empty mesh.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Mesh vertices.
    #[must_use]
    pub fn points(&self) -> &[[f32; 3]] {
        &self.points
    }

    /// Triangles as indices into [`points`](Self::points).
    #[must_use]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Returns true if the mesh has no triangles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Axis-aligned bounding box `(min, max)`, or `None` without points.
    #[must_use]
    pub fn bounds(&self) -> Option<([f32; 3], [f32; 3])> {
        let first = *self.points.first()?;
        Some(self.points.iter().fold((first, first), |(mut lo, mut hi), p| {
            for axis in 0..3 {
                lo[axis] = lo[axis].min(p[axis]);
                hi[axis] = hi[axis].max(p[axis]);
            }
            (lo, hi)
        }))
    }
}
