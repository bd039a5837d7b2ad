//! Owner of the console's background tasks

use std::{sync::Arc, time::Duration};
use tokio::task::JoinHandle;
use tracing::info;

use crate::state::AppState;
use super::{countdown_task, scene_animation_task, status_poll_task};

/// Periods for each background task
#[derive(Debug, Clone, Copy)]
pub struct TaskPeriods {
    pub tick: Duration,
    pub status_poll: Duration,
    pub frame: Duration,
}

impl TaskPeriods {
    /// Periods from a poll interval in seconds and a frame rate
    pub fn new(status_poll_seconds: u64, fps: u32) -> Self {
        Self {
            tick: Duration::from_secs(1),
            status_poll: Duration::from_secs(status_poll_seconds.max(1)),
            frame: Duration::from_secs_f64(1.0 / fps.max(1) as f64),
        }
    }
}

impl Default for TaskPeriods {
    fn default() -> Self {
        Self::new(40, 60)
    }
}

/// Starts, stops and tears down the countdown, status-poll and animation tasks
pub struct Scheduler {
    state: Arc<AppState>,
    periods: TaskPeriods,
    countdown: Option<JoinHandle<()>>,
    status_poll: Option<JoinHandle<()>>,
    animation: Option<JoinHandle<()>>,
}

fn is_live(handle: &Option<JoinHandle<()>>) -> bool {
    handle.as_ref().map_or(false, |h| !h.is_finished())
}

fn abort(handle: &mut Option<JoinHandle<()>>) {
    if let Some(handle) = handle.take() {
        handle.abort();
    }
}

impl Scheduler {
    pub fn new(state: Arc<AppState>, periods: TaskPeriods) -> Self {
        Self {
            state,
            periods,
            countdown: None,
            status_poll: None,
            animation: None,
        }
    }

    pub fn start_countdown(&mut self) {
        if !is_live(&self.countdown) {
            let state = Arc::clone(&self.state);
            let period = self.periods.tick;
            self.countdown = Some(tokio::spawn(async move {
                countdown_task(state, period).await;
            }));
        }
    }

    pub fn stop_countdown(&mut self) {
        abort(&mut self.countdown);
    }

    pub fn start_status_poll(&mut self) {
        if !is_live(&self.status_poll) {
            let state = Arc::clone(&self.state);
            let period = self.periods.status_poll;
            self.status_poll = Some(tokio::spawn(async move {
                status_poll_task(state, period).await;
            }));
        }
    }

    pub fn stop_status_poll(&mut self) {
        abort(&mut self.status_poll);
    }

    pub fn start_animation(&mut self) {
        if !is_live(&self.animation) {
            let state = Arc::clone(&self.state);
            let frame = self.periods.frame;
            self.animation = Some(tokio::spawn(async move {
                scene_animation_task(state, frame).await;
            }));
        }
    }

    pub fn stop_animation(&mut self) {
        abort(&mut self.animation);
    }

    pub fn start_all(&mut self) {
        self.start_countdown();
        self.start_status_poll();
        self.start_animation();
    }

    /// Whether any task is still scheduled
    pub fn is_active(&self) -> bool {
        is_live(&self.countdown) || is_live(&self.status_poll) || is_live(&self.animation)
    }

    /// Tear the console down: late fetch results are discarded and every task is stopped
    pub fn shutdown(&mut self) {
        info!("Shutting down background tasks");
        self.state.teardown();
        self.stop_countdown();
        self.stop_status_poll();
        self.stop_animation();
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.stop_countdown();
        self.stop_status_poll();
        self.stop_animation();
    }
}
