//! Console state shared by the API handlers and the background tasks

use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Instant,
};
use serde::{Deserialize, Serialize};
use tokio::{sync::watch, task::JoinHandle};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::services::StatusTextSource;
use super::{LogEntry, SceneClock, SceneFrame, StatusLog, TimerState, TimerStatus, Viewport};

/// Light/dark presentation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    Light,
    Dark,
}

impl DisplayMode {
    pub fn toggled(self) -> Self {
        match self {
            DisplayMode::Light => DisplayMode::Dark,
            DisplayMode::Dark => DisplayMode::Light,
        }
    }
}

/// Counts a fetch as in flight until dropped, even if its task is aborted
struct InFlightFetch {
    state: Arc<AppState>,
}

impl InFlightFetch {
    fn new(state: Arc<AppState>) -> Self {
        state.fetches_in_flight.fetch_add(1, Ordering::SeqCst);
        Self { state }
    }

    fn finish(self) -> Arc<AppState> {
        Arc::clone(&self.state)
    }
}

impl Drop for InFlightFetch {
    fn drop(&mut self) {
        self.state.fetches_in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Main application state: timer, log, scene clock and presentation settings
pub struct AppState {
    pub timer_state: Arc<Mutex<TimerState>>,
    pub status_log: Arc<Mutex<StatusLog>>,
    pub scene: Arc<Mutex<SceneClock>>,
    pub display_mode: Arc<Mutex<DisplayMode>>,
    /// Source for generated log lines
    status_source: Arc<dyn StatusTextSource>,
    /// Channel for timer status transitions
    pub status_tx: watch::Sender<TimerStatus>,
    /// Keep the receiver alive to prevent channel closure
    pub _status_rx: watch::Receiver<TimerStatus>,
    /// Cancelled once the console is torn down
    teardown: CancellationToken,
    fetches_in_flight: AtomicUsize,
    /// Server metadata
    pub start_time: Instant,
}

impl AppState {
    /// Create a new AppState with an idle timer of `duration_seconds`
    pub fn new(
        duration_seconds: u64,
        display_mode: DisplayMode,
        status_source: Arc<dyn StatusTextSource>,
    ) -> Self {
        let (status_tx, status_rx) = watch::channel(TimerStatus::Idle);

        Self {
            timer_state: Arc::new(Mutex::new(TimerState::with_duration(duration_seconds))),
            status_log: Arc::new(Mutex::new(StatusLog::new())),
            scene: Arc::new(Mutex::new(SceneClock::new())),
            display_mode: Arc::new(Mutex::new(display_mode)),
            status_source,
            status_tx,
            _status_rx: status_rx,
            teardown: CancellationToken::new(),
            fetches_in_flight: AtomicUsize::new(0),
            start_time: Instant::now(),
        }
    }

    /// Apply a timer transition, record its log entry and publish status changes
    fn update_timer<F>(&self, action: &str, updater: F) -> Result<(TimerState, Option<LogEntry>), String>
    where
        F: FnOnce(&mut TimerState) -> Option<LogEntry>,
    {
        let mut timer = self.timer_state.lock()
            .map_err(|e| format!("Failed to lock timer state: {}", e))?;

        let previous = timer.status;
        let entry = updater(&mut *timer);
        let new_timer = timer.clone();
        drop(timer); // Release the lock early

        // Publish first so the tick source follows the timer even if logging fails
        if new_timer.status != previous {
            info!("Timer {}: {:?} -> {:?}", action, previous, new_timer.status);
        }
        self.status_tx.send_if_modified(|status| {
            if *status != new_timer.status {
                *status = new_timer.status;
                true
            } else {
                false
            }
        });

        if let Some(entry) = &entry {
            if let Err(e) = self.push_log(entry.clone()) {
                warn!("Failed to record {} log entry: {}", action, e);
            }
        }

        Ok((new_timer, entry))
    }

    /// Start/resume or pause the countdown
    pub fn toggle(&self) -> Result<(TimerState, LogEntry), String> {
        let (timer, entry) = self.update_timer("toggle", |timer| Some(timer.toggle()))?;
        entry
            .map(|entry| (timer, entry))
            .ok_or_else(|| "Toggle produced no log entry".to_string())
    }

    /// Return the countdown to idle at full duration
    pub fn reset(&self) -> Result<(TimerState, LogEntry), String> {
        let (timer, entry) = self.update_timer("reset", |timer| Some(timer.reset()))?;
        entry
            .map(|entry| (timer, entry))
            .ok_or_else(|| "Reset produced no log entry".to_string())
    }

    /// One-second countdown tick
    pub fn tick(&self) -> Result<TimerState, String> {
        let (timer, entry) = self.update_timer("tick", |timer| timer.tick())?;
        match entry {
            Some(_) => info!("Countdown completed"),
            None => debug!("Tick: {}s remaining", timer.seconds_remaining),
        }
        Ok(timer)
    }

    pub fn get_timer_state(&self) -> Result<TimerState, String> {
        self.timer_state.lock()
            .map(|state| state.clone())
            .map_err(|e| format!("Failed to lock timer state: {}", e))
    }

    pub fn is_running(&self) -> bool {
        self.timer_state.lock().map(|timer| timer.is_running()).unwrap_or(false)
    }

    fn push_log(&self, entry: LogEntry) -> Result<(), String> {
        let mut log = self.status_log.lock()
            .map_err(|e| format!("Failed to lock status log: {}", e))?;
        log.push(entry);
        Ok(())
    }

    /// Log entries, newest first
    pub fn get_log(&self) -> Result<Vec<LogEntry>, String> {
        self.status_log.lock()
            .map(|log| log.to_vec())
            .map_err(|e| format!("Failed to lock status log: {}", e))
    }

    /// Start a status fetch if the countdown is running
    ///
    /// Returns the handle of the spawned fetch, or `None` when the timer is
    /// not running and nothing was attempted.
    pub fn poll_status(self: &Arc<Self>) -> Result<Option<JoinHandle<()>>, String> {
        if self.is_torn_down() {
            return Ok(None);
        }

        let timer = self.get_timer_state()?;
        if !timer.is_running() {
            debug!("Status poll skipped, timer is {:?}", timer.status);
            return Ok(None);
        }

        let seconds_remaining = timer.seconds_remaining;
        let guard = InFlightFetch::new(Arc::clone(self));

        Ok(Some(tokio::spawn(async move {
            let text = guard.state.status_source.fetch(seconds_remaining).await;
            let state = guard.finish();
            if let Err(e) = state.append_status(text) {
                warn!("Failed to append status entry: {}", e);
            }
        })))
    }

    /// Append a generated status line; dropped after teardown
    pub fn append_status(&self, text: String) -> Result<bool, String> {
        if self.is_torn_down() {
            debug!("Discarding status text that arrived after teardown");
            return Ok(false);
        }
        self.push_log(LogEntry::status(text))?;
        Ok(true)
    }

    pub fn fetches_in_flight(&self) -> usize {
        self.fetches_in_flight.load(Ordering::SeqCst)
    }

    /// Advance the scene by one frame, sampling the running flag now
    pub fn advance_scene(&self) -> Result<f64, String> {
        let running = self.is_running();
        let mut scene = self.scene.lock()
            .map_err(|e| format!("Failed to lock scene clock: {}", e))?;
        Ok(scene.step(running))
    }

    pub fn scene_frame(&self) -> Result<SceneFrame, String> {
        self.scene.lock()
            .map(|scene| scene.snapshot())
            .map_err(|e| format!("Failed to lock scene clock: {}", e))
    }

    pub fn resize_viewport(&self, width: u32, height: u32) -> Result<Viewport, String> {
        let mut scene = self.scene.lock()
            .map_err(|e| format!("Failed to lock scene clock: {}", e))?;
        let viewport = scene.resize(width, height);
        debug!("Viewport resized to {}x{} (aspect {:.3})", viewport.width, viewport.height, viewport.aspect);
        Ok(viewport)
    }

    pub fn set_pointer(&self, x: f64, y: f64) -> Result<(), String> {
        let mut scene = self.scene.lock()
            .map_err(|e| format!("Failed to lock scene clock: {}", e))?;
        scene.set_pointer(x, y);
        Ok(())
    }

    pub fn get_display_mode(&self) -> Result<DisplayMode, String> {
        self.display_mode.lock()
            .map(|mode| *mode)
            .map_err(|e| format!("Failed to lock display mode: {}", e))
    }

    pub fn toggle_display_mode(&self) -> Result<DisplayMode, String> {
        let mut mode = self.display_mode.lock()
            .map_err(|e| format!("Failed to lock display mode: {}", e))?;
        *mode = mode.toggled();
        info!("Display mode set to {:?}", *mode);
        Ok(*mode)
    }

    /// Token cancelled on teardown; background tasks watch it to exit
    pub fn teardown_token(&self) -> CancellationToken {
        self.teardown.clone()
    }

    pub fn teardown(&self) {
        if !self.teardown.is_cancelled() {
            info!("Tearing down console state");
            self.teardown.cancel();
        }
    }

    pub fn is_torn_down(&self) -> bool {
        self.teardown.is_cancelled()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}
