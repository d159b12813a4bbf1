//! segview-core: Core types and collaborator traits for CT segment processing.
//!
//! This crate provides the shared vocabulary of the workspace: voxel volumes,
//! polygon meshes, label values and the segment table, plus the
//! [`ImagingToolkit`] trait through which thresholding, isosurface extraction
//! and file codecs are delegated to an external imaging library.
//!

pub mod error;
pub mod label;
pub mod mesh;
pub mod toolkit;
pub mod volume;

pub use error::{Error, Result};
pub use label::{LabelValue, Segment, SegmentTable};
pub use mesh::PolyMesh;
pub use toolkit::{ImagingToolkit, StlEncoding, ToolkitError};
pub use volume::{physical_size, Volume};
