//! segview-render: Render-slot management for multi-viewport viewers.
//!
//! A fixed grid of display surfaces, each owning exactly one renderer, receives
//! content in round-robin order. Assigning content to a slot releases whatever
//! the slot displayed before. The actual drawing is delegated to a
//! visualization library through the [`Surface`], [`Renderer`] and
//! [`SceneBuilder`] traits.
//!

mod backend;
mod error;
pub mod manager;
pub mod style;
pub mod viewer;

pub use backend::{BackendError, Renderer, Rgb, SceneBuilder, Surface, DEFAULT_BACKGROUND};
pub use error::{RenderError, Result};
pub use manager::{RenderSlot, SlotManager};
pub use style::{
    ColorPalette, OpacityPoint, Primitive, Representation, Shape, SurfaceStyle, TransferPoint,
    VolumeStyle,
};
pub use viewer::{ContentKind, Viewer};
