//! Segment view and export workers.
//!
//! Each worker builds an [`ArtifactCache`] for its job, runs the pipeline
//! stage by stage and reports through the channel. The cancel flag is
//! checked between stages; a stage already running completes.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::time::Instant;

use segview_cache::ArtifactCache;
use segview_core::{physical_size, ImagingToolkit};

use super::SegmentJob;
use crate::message::AppMessage;

fn cache_for<T: ImagingToolkit>(job: &SegmentJob, toolkit: T) -> ArtifactCache<T> {
    ArtifactCache::new(toolkit, job.source.clone(), job.output_dir.clone()).with_policy(job.policy)
}

fn cancelled(job: &SegmentJob, tx: &Sender<AppMessage>, cancel_flag: &AtomicBool) -> bool {
    if cancel_flag.load(Ordering::SeqCst) {
        let _ = tx.send(AppMessage::Cancelled(job.name.clone()));
        true
    } else {
        false
    }
}

/// Extracts the mesh and physical size of a segment in a background thread.
pub fn run_view_worker<T: ImagingToolkit>(
    job: &SegmentJob,
    toolkit: T,
    tx: &Sender<AppMessage>,
    cancel_flag: &AtomicBool,
) {
    let start = Instant::now();
    let cache = cache_for(job, toolkit);

    let _ = tx.send(AppMessage::Progress(
        0.1,
        format!("Extracting surface of {}...", job.name),
    ));
    if cancelled(job, tx, cancel_flag) {
        return;
    }
    let mesh = match cache.ensure_mesh(job.label) {
        Ok(m) => m,
        Err(e) => {
            let _ = tx.send(AppMessage::JobError(e.to_string()));
            return;
        }
    };

    let _ = tx.send(AppMessage::Progress(
        0.7,
        format!("Measuring {}...", job.name),
    ));
    if cancelled(job, tx, cancel_flag) {
        return;
    }
    let mask = match cache.ensure_mask_from_source(job.label) {
        Ok(m) => m,
        Err(e) => {
            let _ = tx.send(AppMessage::JobError(e.to_string()));
            return;
        }
    };

    let _ = tx.send(AppMessage::ViewComplete {
        name: job.name.clone(),
        mesh: Arc::new(mesh),
        physical_size: physical_size(&mask),
        elapsed: start.elapsed(),
    });
}

/// Produces the STL export of a segment in a background thread.
pub fn run_export_worker<T: ImagingToolkit>(
    job: &SegmentJob,
    toolkit: T,
    tx: &Sender<AppMessage>,
    cancel_flag: &AtomicBool,
) {
    let start = Instant::now();
    let cache = cache_for(job, toolkit);

    let _ = tx.send(AppMessage::Progress(
        0.1,
        format!("Exporting {}...", job.name),
    ));
    if cancelled(job, tx, cancel_flag) {
        return;
    }
    match cache.ensure_stl(job.label) {
        Ok(stl) => {
            let _ = tx.send(AppMessage::ExportComplete {
                name: job.name.clone(),
                stl,
                elapsed: start.elapsed(),
            });
        }
        Err(e) => {
            let _ = tx.send(AppMessage::JobError(e.to_string()));
        }
    }
}
