//! segview-app: Application logic behind the segview viewer window.
//!
//! Holds everything a GUI front-end delegates to: the segment selector, the
//! view/export actions with their background workers, and the status line.
//! Workers report back over a channel; only the thread owning
//! [`SegmentApp`] touches the viewer.
//!

mod app;
pub mod config;
mod error;
pub mod message;
pub mod pipeline;
pub mod state;

pub use app::SegmentApp;
pub use config::{AppConfig, GridConfig};
pub use error::{AppError, Result};
pub use message::AppMessage;
pub use pipeline::{JobKind, SegmentJob};
pub use state::ProcessingState;
