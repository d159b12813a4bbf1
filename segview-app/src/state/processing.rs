//! Processing state for background operations.

/// Tracks the state of background segment jobs.
pub struct ProcessingState {
    /// Whether a segment job is in flight.
    pub is_processing: bool,
    /// Progress value from 0.0 to 1.0.
    pub progress: f32,
    /// User-facing status message.
    pub status_text: String,
}

impl Default for ProcessingState {
    fn default() -> Self {
        Self {
            is_processing: false,
            progress: 0.0,
            status_text: "Ready".to_string(),
        }
    }
}

impl ProcessingState {
    /// Marks a job as started.
    pub fn start(&mut self, status: impl Into<String>) {
        self.is_processing = true;
        self.progress = 0.0;
        self.status_text = status.into();
    }

    /// Marks the current job as finished with a final status line.
    pub fn finish(&mut self, status: impl Into<String>) {
        self.is_processing = false;
        self.progress = 1.0;
        self.status_text = status.into();
    }

    /// Replaces the status line without changing job state.
    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status_text = status.into();
    }
}
