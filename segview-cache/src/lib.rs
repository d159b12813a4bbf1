//! segview-cache: Derived-artifact cache for CT segments.
//!
//! For a source label volume and a label value, three files are derived and
//! kept in an output directory: the thresholded binary mask, the polygon mesh
//! extracted from it, and an STL export of that mesh. Each is computed only
//! when its file is missing (or, under [`CachePolicy::Fingerprint`], when the
//! source volume changed since it was written).
//!

mod cache;
mod error;
pub mod paths;
pub mod policy;

pub use cache::{ArtifactCache, ArtifactStatus, MASK_ISO_VALUE};
pub use error::{Error, Result};
pub use paths::ArtifactPaths;
pub use policy::{CachePolicy, SourceFingerprint};
