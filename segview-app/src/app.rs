//! Main application state and logic.
//!
//! Contains the `SegmentApp` struct which owns the viewer, dispatches segment
//! jobs to worker threads and applies their results.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use log::{info, warn};
use segview_core::ImagingToolkit;
use segview_render::{ContentKind, SceneBuilder, Surface, Viewer};

use crate::message::AppMessage;
use crate::pipeline::{run_export_worker, run_view_worker, JobKind, SegmentJob};
use crate::state::ProcessingState;
use crate::{AppConfig, AppError, Result};

/// Application state behind the viewer window.
pub struct SegmentApp<S, B, T>
where
    S: Surface,
    B: SceneBuilder<S::Renderer>,
{
    viewer: Viewer<S, B>,
    toolkit: Arc<T>,
    config: AppConfig,
    /// Segment selector index.
    selected: usize,

    rx: Receiver<AppMessage>,
    tx: Sender<AppMessage>,
    cancel_flag: Arc<AtomicBool>,
    workers: Vec<JoinHandle<()>>,

    processing: ProcessingState,
}

impl<S, B, T> SegmentApp<S, B, T>
where
    S: Surface,
    B: SceneBuilder<S::Renderer>,
    T: ImagingToolkit + 'static,
{
    /// Creates the application over one surface per grid cell.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::GridMismatch`] if the number of surfaces differs
    /// from the configured grid, or the render error of viewer setup.
    pub fn new(
        surfaces: impl IntoIterator<Item = S>,
        builder: B,
        toolkit: T,
        config: AppConfig,
    ) -> Result<Self> {
        let surfaces: Vec<S> = surfaces.into_iter().collect();
        let grid = config.grid;
        if surfaces.len() != grid.slot_count() {
            return Err(AppError::GridMismatch {
                surfaces: surfaces.len(),
                rows: grid.rows,
                cols: grid.cols,
            });
        }
        let viewer = Viewer::new(surfaces, builder)?;
        let (tx, rx) = channel();
        Ok(Self {
            viewer,
            toolkit: Arc::new(toolkit),
            config,
            selected: 0,
            rx,
            tx,
            cancel_flag: Arc::new(AtomicBool::new(false)),
            workers: Vec::new(),
            processing: ProcessingState::default(),
        })
    }

    /// Viewer owned by the application.
    #[must_use]
    pub fn viewer(&self) -> &Viewer<S, B> {
        &self.viewer
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Current status line.
    #[must_use]
    pub fn status_text(&self) -> &str {
        &self.processing.status_text
    }

    /// Background job state.
    #[must_use]
    pub fn processing(&self) -> &ProcessingState {
        &self.processing
    }

    /// Whether a segment job is in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.processing.is_processing
    }

    /// Selected segment index.
    #[must_use]
    pub fn selected_segment(&self) -> usize {
        self.selected
    }

    /// Opens a CT volume and renders it into the next slot.
    ///
    /// # Errors
    ///
    /// Returns the render error if no volume could be shown; the status line
    /// reports it and the slots keep their content.
    pub fn open_ct_file(&mut self, path: impl Into<PathBuf>) -> Result<usize> {
        let path = path.into();
        self.viewer.set_source_filename(path.clone());
        match self.viewer.render(ContentKind::Volume) {
            Ok(slot) => {
                self.log_placement(ContentKind::Volume, slot);
                self.processing
                    .set_status(format!("Loaded {}", path.display()));
                Ok(slot)
            }
            Err(e) => {
                self.processing.set_status(format!("Error: {e}"));
                Err(e.into())
            }
        }
    }

    /// Changes the selected segment.
    pub fn select_segment(&mut self, index: usize) {
        self.selected = index;
        let name = self.config.segments.name_for(index);
        self.processing
            .set_status(format!("{name} is ready for [View | Export] actions"));
    }

    /// Starts extracting the selected segment's mesh for display.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Busy`] while another job runs and
    /// [`AppError::NoSource`] when no CT volume is known.
    pub fn view_segment(&mut self) -> Result<()> {
        self.spawn_job(JobKind::View)
    }

    /// Starts exporting the selected segment as STL.
    ///
    /// # Errors
    ///
    /// Same as [`view_segment`](Self::view_segment).
    pub fn export_segment(&mut self) -> Result<()> {
        self.spawn_job(JobKind::Export)
    }

    /// Adds a cube to the next slot.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the cube cannot be built.
    pub fn add_cube(&mut self) -> Result<usize> {
        Ok(self.viewer.add_primitive()?)
    }

    /// Clears every viewport.
    pub fn clear_window(&mut self) {
        self.viewer.clear_all();
    }

    /// Requests the running job to stop at its next stage boundary.
    pub fn cancel(&self) {
        self.cancel_flag.store(true, Ordering::SeqCst);
    }

    /// Applies pending worker messages and reaps finished workers.
    /// Returns how many messages were handled.
    ///
    /// A worker that died without reporting ends the job with an error
    /// status.
    pub fn handle_messages(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(msg) = self.rx.try_recv() {
            handled += 1;
            self.apply(msg);
        }
        let (finished, running): (Vec<_>, Vec<_>) =
            self.workers.drain(..).partition(|w| w.is_finished());
        self.workers = running;
        for worker in finished {
            if worker.join().is_err() {
                self.worker_died();
            }
        }
        handled
    }

    /// Blocks until every worker has exited, then applies their messages.
    pub fn finish_jobs(&mut self) -> usize {
        let mut died = false;
        for worker in self.workers.drain(..) {
            died |= worker.join().is_err();
        }
        let handled = self.handle_messages();
        if died {
            self.worker_died();
        }
        handled
    }

    fn worker_died(&mut self) {
        warn!("segment worker panicked");
        self.processing
            .finish("Error: segment worker stopped unexpectedly");
    }

    fn log_placement(&self, kind: ContentKind, slot: usize) {
        if let Some((row, col)) = self.config.grid.position(slot) {
            info!("{kind} shown in viewport row {row}, column {col}");
        }
    }

    fn job_source(&self) -> Option<&Path> {
        self.config
            .source_volume
            .as_deref()
            .or_else(|| self.viewer.source_filename())
    }

    fn spawn_job(&mut self, kind: JobKind) -> Result<()> {
        if self.processing.is_processing {
            self.processing
                .set_status("Busy: wait for the current job or cancel it");
            return Err(AppError::Busy);
        }
        let Some(source) = self.job_source().map(Path::to_path_buf) else {
            self.processing
                .set_status(format!("Error: {}", AppError::NoSource));
            return Err(AppError::NoSource);
        };

        let job = SegmentJob {
            name: self.config.segments.name_for(self.selected),
            label: self.config.segments.label_for(self.selected),
            source,
            output_dir: self.config.output_dir.clone(),
            policy: self.config.cache_policy,
        };
        info!("starting {kind} job for {} (label {})", job.name, job.label);
        self.processing
            .start(format!("Processing {}...", job.name));

        self.cancel_flag = Arc::new(AtomicBool::new(false));
        let cancel_flag = Arc::clone(&self.cancel_flag);
        let toolkit = Arc::clone(&self.toolkit);
        let tx = self.tx.clone();
        let handle = thread::spawn(move || match kind {
            JobKind::View => run_view_worker(&job, toolkit, &tx, &cancel_flag),
            JobKind::Export => run_export_worker(&job, toolkit, &tx, &cancel_flag),
        });
        self.workers.push(handle);
        Ok(())
    }

    fn apply(&mut self, msg: AppMessage) {
        match msg {
            // late progress from a job that already ended is dropped
            AppMessage::Progress(p, s) if self.processing.is_processing => {
                self.processing.progress = p;
                self.processing.status_text = s;
            }
            AppMessage::Progress(..) => {}
            AppMessage::ViewComplete {
                name,
                mesh,
                physical_size,
                elapsed,
            } => {
                info!("{name} extracted in {:.2}s", elapsed.as_secs_f64());
                self.viewer.set_mesh_in_memory(mesh);
                match self.viewer.render(ContentKind::Mesh) {
                    Ok(slot) => {
                        self.log_placement(ContentKind::Mesh, slot);
                        self.processing.finish(format!(
                            "{name} has a surface volume of: {physical_size:.4} mm^3"
                        ));
                    }
                    Err(e) => self.processing.finish(format!("Error: {e}")),
                }
            }
            AppMessage::ExportComplete { name, stl, elapsed } => {
                info!("{name} exported in {:.2}s", elapsed.as_secs_f64());
                self.processing
                    .finish(format!("Exported path: {}", stl.display()));
            }
            AppMessage::Cancelled(name) => {
                self.processing.finish(format!("Cancelled {name}"));
            }
            AppMessage::JobError(e) => {
                warn!("segment job failed: {e}");
                self.processing.finish(format!("Error: {e}"));
            }
        }
    }
}
