//! Application message types for async communication.
//!
//! Messages are sent from background worker threads to the thread owning the
//! viewer via channels to report progress, completion, and errors.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use segview_core::PolyMesh;

/// Messages sent from background workers to the owning thread.
pub enum AppMessage {
    /// Progress update with a value from 0.0 to 1.0.
    Progress(f32, String),

    /// Segment mesh ready for display.
    ViewComplete {
        /// Segment display name.
        name: String,
        /// Extracted surface mesh.
        mesh: Arc<PolyMesh>,
        /// Mask volume in cubic length units.
        physical_size: f64,
        /// Time taken by the job.
        elapsed: Duration,
    },

    /// STL export finished.
    ExportComplete {
        /// Segment display name.
        name: String,
        /// Written (or already present) STL file.
        stl: PathBuf,
        /// Time taken by the job.
        elapsed: Duration,
    },

    /// Job stopped on request.
    Cancelled(String),

    /// Job failed.
    JobError(String),
}
