//! Visualization collaborator traits.

use std::path::Path;
use std::sync::Arc;

use segview_core::PolyMesh;
use thiserror::Error;

use crate::style::{Primitive, SurfaceStyle, VolumeStyle};

/// Linear RGB colour, components in `[0, 1]`.
pub type Rgb = [f64; 3];

/// Slate blue background used for every viewport.
pub const DEFAULT_BACKGROUND: Rgb = [0.2, 0.3, 0.4];

/// Failure inside the visualization library.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct BackendError(pub String);

impl BackendError {
    /// Creates a backend error from any message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Draws a scene onto one display surface. Owns the camera and background.
pub trait Renderer {
    /// Handle to one piece of displayed content (actor or volume).
    type Content;

    /// Adds content to the scene.
    fn add_content(&mut self, content: &Self::Content);

    /// Removes every piece of content from the scene.
    fn remove_all_content(&mut self);

    /// Redraws the surface.
    fn render(&mut self);

    /// Moves the camera so the whole scene is in view.
    fn reset_camera(&mut self);
}

/// Display surface (viewport widget) that can host a renderer.
pub trait Surface {
    /// Renderer type created for this surface.
    type Renderer: Renderer;

    /// Creates a renderer bound to this surface.
    fn attach_renderer(&mut self, background: Rgb) -> Result<Self::Renderer, BackendError>;
}

/// Builds displayable content for a renderer.
pub trait SceneBuilder<R: Renderer> {
    /// Geometric primitive (placeholder or user-added shape).
    fn primitive(&mut self, renderer: &R, primitive: &Primitive)
        -> Result<R::Content, BackendError>;

    /// Direct volume rendering of the image at `source`.
    fn volume(
        &mut self,
        renderer: &R,
        source: &Path,
        style: &VolumeStyle,
    ) -> Result<R::Content, BackendError>;

    /// Surface rendering of an in-memory mesh.
    fn surface(
        &mut self,
        renderer: &R,
        mesh: &Arc<PolyMesh>,
        style: &SurfaceStyle,
    ) -> Result<R::Content, BackendError>;
}
