//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    celestial::{CelestialBody, Comet, Spacecraft},
    state::{DisplayMode, LogEntry, TimerState, TimerStatus, Viewport},
};

/// Response for timer actions (toggle, reset)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerActionResponse {
    pub status: TimerStatus,
    pub seconds_remaining: u64,
    pub display_time: String,
    pub entry: LogEntry,
    pub timestamp: DateTime<Utc>,
}

impl TimerActionResponse {
    pub fn new(timer: &TimerState, entry: LogEntry) -> Self {
        Self {
            status: timer.status,
            seconds_remaining: timer.seconds_remaining,
            display_time: timer.display_time(),
            entry,
            timestamp: Utc::now(),
        }
    }
}

/// Full console status: timer, log and presentation mode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: TimerStatus,
    pub seconds_remaining: u64,
    pub duration_seconds: u64,
    pub display_time: String,
    pub display_mode: DisplayMode,
    pub log: Vec<LogEntry>,
    pub uptime: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ViewportRequest {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ViewportResponse {
    pub viewport: Viewport,
}

/// Normalized pointer position, each axis in [-1, 1]
#[derive(Debug, Clone, Deserialize)]
pub struct PointerRequest {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayModeResponse {
    pub display_mode: DisplayMode,
}

#[derive(Debug, Clone, Serialize)]
pub struct BodyInfo {
    #[serde(flatten)]
    pub body: CelestialBody,
    pub period_display: String,
}

/// Static reference data
#[derive(Debug, Clone, Serialize)]
pub struct BodiesResponse {
    pub bodies: Vec<BodyInfo>,
    pub comets: Vec<Comet>,
    pub spacecraft: Spacecraft,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
