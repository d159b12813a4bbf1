//! Viewer facade: the operations a GUI wires its buttons to.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{info, warn};
use segview_core::PolyMesh;

use crate::style::{ColorPalette, Primitive, SurfaceStyle, VolumeStyle};
use crate::{RenderError, Result, SceneBuilder, SlotManager, Surface};

/// Kind of content produced by [`Viewer::render`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// Direct volume rendering of the source file.
    Volume,
    /// Surface rendering of the in-memory mesh.
    Mesh,
    /// A coloured cube.
    Primitive,
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentKind::Volume => write!(f, "volume"),
            ContentKind::Mesh => write!(f, "mesh"),
            ContentKind::Primitive => write!(f, "primitive"),
        }
    }
}

/// Multi-viewport viewer built on a [`SlotManager`].
///
/// Every render request goes through [`SlotManager::assign`], so volumes,
/// meshes and primitives share the same round-robin placement.
pub struct Viewer<S, B>
where
    S: Surface,
    B: SceneBuilder<S::Renderer>,
{
    slots: SlotManager<S>,
    builder: B,
    source: Option<PathBuf>,
    mesh: Option<Arc<PolyMesh>>,
    volume_style: VolumeStyle,
    surface_style: SurfaceStyle,
    palette: ColorPalette,
}

impl<S, B> Viewer<S, B>
where
    S: Surface,
    B: SceneBuilder<S::Renderer>,
{
    /// Creates a viewer over `surfaces` and shows a placeholder in each slot.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::NoSurfaces`] for an empty grid, or the backend
    /// error of renderer or placeholder creation.
    pub fn new(surfaces: impl IntoIterator<Item = S>, mut builder: B) -> Result<Self> {
        let mut slots = SlotManager::new(surfaces)?;
        let placeholder = Primitive::placeholder();
        slots.populate_each(|renderer| builder.primitive(renderer, &placeholder))?;
        Ok(Self {
            slots,
            builder,
            source: None,
            mesh: None,
            volume_style: VolumeStyle::default(),
            surface_style: SurfaceStyle::default(),
            palette: ColorPalette::default(),
        })
    }

    /// Replaces the volume rendering style.
    #[must_use]
    pub fn with_volume_style(mut self, style: VolumeStyle) -> Self {
        self.volume_style = style;
        self
    }

    /// Replaces the surface material.
    #[must_use]
    pub fn with_surface_style(mut self, style: SurfaceStyle) -> Self {
        self.surface_style = style;
        self
    }

    /// Sets the volume file used by [`ContentKind::Volume`].
    pub fn set_source_filename(&mut self, path: impl Into<PathBuf>) {
        self.source = Some(path.into());
    }

    /// Volume file used by [`ContentKind::Volume`].
    #[must_use]
    pub fn source_filename(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Sets the mesh used by [`ContentKind::Mesh`].
    pub fn set_mesh_in_memory(&mut self, mesh: Arc<PolyMesh>) {
        self.mesh = Some(mesh);
    }

    /// Mesh used by [`ContentKind::Mesh`].
    #[must_use]
    pub fn mesh_in_memory(&self) -> Option<&Arc<PolyMesh>> {
        self.mesh.as_ref()
    }

    /// Renders content of `kind` into the next slot.
    ///
    /// Returns the slot index used. A missing input is logged and returned
    /// as [`RenderError::MissingInput`] without touching any slot.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::MissingInput`] or [`RenderError::SourceNotFound`]
    /// before any slot is touched, or the backend error of content creation.
    pub fn render(&mut self, kind: ContentKind) -> Result<usize> {
        match kind {
            ContentKind::Volume => self.render_volume(),
            ContentKind::Mesh => self.render_mesh(),
            ContentKind::Primitive => self.add_primitive(),
        }
    }

    /// Adds a cube in the next palette colour to the next slot.
    ///
    /// # Errors
    ///
    /// Returns the backend error of content creation.
    pub fn add_primitive(&mut self) -> Result<usize> {
        let cube = Primitive::cube(self.palette.next_color());
        let builder = &mut self.builder;
        self.slots
            .assign(|renderer| builder.primitive(renderer, &cube))
    }

    /// Clears every slot.
    pub fn clear_all(&mut self) {
        self.slots.clear_all();
    }

    /// Clears one slot; out-of-range indices are reported and ignored.
    pub fn clear_slot(&mut self, index: usize) -> bool {
        self.slots.clear_slot(index)
    }

    /// Underlying slot manager.
    #[must_use]
    pub fn slots(&self) -> &SlotManager<S> {
        &self.slots
    }

    /// Scene builder used for content creation.
    #[must_use]
    pub fn builder(&self) -> &B {
        &self.builder
    }

    fn render_volume(&mut self) -> Result<usize> {
        let Some(source) = self.source.as_deref() else {
            warn!("volume render requested without a source filename");
            return Err(RenderError::MissingInput("source filename"));
        };
        if !source.exists() {
            warn!("volume source {} does not exist", source.display());
            return Err(RenderError::SourceNotFound(source.to_path_buf()));
        }
        info!("rendering volume {}", source.display());
        let builder = &mut self.builder;
        let style = &self.volume_style;
        self.slots
            .assign(|renderer| builder.volume(renderer, source, style))
    }

    fn render_mesh(&mut self) -> Result<usize> {
        let Some(mesh) = self.mesh.as_ref() else {
            warn!("mesh render requested without a mesh in memory");
            return Err(RenderError::MissingInput("mesh"));
        };
        info!("rendering mesh with {} triangles", mesh.triangle_count());
        let builder = &mut self.builder;
        let style = &self.surface_style;
        self.slots
            .assign(|renderer| builder.surface(renderer, mesh, style))
    }
}
