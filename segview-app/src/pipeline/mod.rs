//! Background segment jobs.

mod segment;

use std::path::PathBuf;

use segview_cache::CachePolicy;
use segview_core::LabelValue;

pub use segment::{run_export_worker, run_view_worker};

/// What a segment job produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobKind {
    /// Mesh and physical size for display.
    View,
    /// STL file on disk.
    Export,
}

impl std::fmt::Display for JobKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobKind::View => write!(f, "view"),
            JobKind::Export => write!(f, "export"),
        }
    }
}

/// Everything a worker needs to process one segment.
#[derive(Debug, Clone)]
pub struct SegmentJob {
    /// Segment display name.
    pub name: String,
    /// Label value to isolate.
    pub label: LabelValue,
    /// Label volume to derive from.
    pub source: PathBuf,
    /// Artifact directory.
    pub output_dir: PathBuf,
    /// Artifact reuse policy.
    pub policy: CachePolicy,
}
