//! State management module
//!
//! This module contains the countdown, log and scene structures and the
//! shared console state that owns them.

pub mod app_state;
pub mod scene_clock;
pub mod status_log;
pub mod timer_state;

// Re-export main types
pub use app_state::{AppState, DisplayMode};
pub use scene_clock::{CameraPose, SceneClock, SceneFrame, Viewport};
pub use status_log::{LogEntry, LogKind, StatusLog, LOG_CAPACITY};
pub use timer_state::{TimerState, TimerStatus, DEFAULT_DURATION_SECONDS};
