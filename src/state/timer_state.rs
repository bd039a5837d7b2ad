//! Countdown timer state machine

use serde::{Deserialize, Serialize};

use crate::celestial::completion_fact;
use super::status_log::LogEntry;

/// Default countdown length in seconds
pub const DEFAULT_DURATION_SECONDS: u64 = 300;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    #[default]
    Idle,
    Running,
    Paused,
    Completed,
}

/// Timer state for the console countdown
///
/// `seconds_remaining` only decreases while running, and reaching zero
/// always moves the timer to `Completed`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerState {
    pub seconds_remaining: u64,
    pub status: TimerStatus,
    pub duration_seconds: u64,
}

impl TimerState {
    /// Create an idle timer with the default duration
    pub fn new() -> Self {
        Self::with_duration(DEFAULT_DURATION_SECONDS)
    }

    /// Create an idle timer with a custom duration
    pub fn with_duration(duration_seconds: u64) -> Self {
        Self {
            seconds_remaining: duration_seconds,
            status: TimerStatus::Idle,
            duration_seconds,
        }
    }

    pub fn is_running(&self) -> bool {
        self.status == TimerStatus::Running
    }

    /// Start/resume, or pause when already running
    pub fn toggle(&mut self) -> LogEntry {
        match self.status {
            TimerStatus::Running => {
                self.status = TimerStatus::Paused;
                LogEntry::warning(format!("Countdown suspended at T-{}.", self.display_time()))
            }
            TimerStatus::Completed => {
                // Re-arm, otherwise the next tick would complete again at zero
                self.seconds_remaining = self.duration_seconds;
                self.status = TimerStatus::Running;
                LogEntry::info(format!("Countdown re-armed. T-{} and counting.", self.display_time()))
            }
            TimerStatus::Idle | TimerStatus::Paused => {
                self.status = TimerStatus::Running;
                LogEntry::info(format!("Countdown engaged. T-{} and counting.", self.display_time()))
            }
        }
    }

    /// Return to idle with the full duration
    pub fn reset(&mut self) -> LogEntry {
        self.status = TimerStatus::Idle;
        self.seconds_remaining = self.duration_seconds;
        LogEntry::info(format!("Countdown reset to T-{}.", self.display_time()))
    }

    /// Advance one second; returns the completion alert when zero is reached
    pub fn tick(&mut self) -> Option<LogEntry> {
        if !self.is_running() {
            return None;
        }

        self.seconds_remaining = self.seconds_remaining.saturating_sub(1);
        if self.seconds_remaining == 0 {
            self.status = TimerStatus::Completed;
            return Some(LogEntry::alert(format!("T-ZERO reached. {}", completion_fact())));
        }
        None
    }

    /// Remaining time as `MM:SS`
    pub fn display_time(&self) -> String {
        format!("{:02}:{:02}", self.seconds_remaining / 60, self.seconds_remaining % 60)
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::status_log::LogKind;

    fn running() -> TimerState {
        let mut timer = TimerState::new();
        timer.reset();
        timer.status = TimerStatus::Running;
        timer
    }

    #[test]
    fn starts_idle_with_full_duration() {
        assert_eq!(TimerStatus::default(), TimerStatus::Idle);
        let timer = TimerState::new();
        assert_eq!(timer.status, TimerStatus::Idle);
        assert_eq!(timer.seconds_remaining, 300);
        assert_eq!(timer.display_time(), "05:00");
    }

    #[test]
    fn n_ticks_remove_n_seconds() {
        for n in 0..=300u64 {
            let mut timer = running();
            let mut alerts = 0;
            for _ in 0..n {
                if timer.tick().is_some() {
                    alerts += 1;
                }
            }
            assert_eq!(timer.seconds_remaining, 300 - n);
            if n == 300 {
                assert_eq!(timer.status, TimerStatus::Completed);
                assert_eq!(alerts, 1);
            } else {
                assert_eq!(timer.status, TimerStatus::Running);
                assert_eq!(alerts, 0);
            }
        }
    }

    #[test]
    fn extra_ticks_after_completion_do_nothing() {
        let mut timer = running();
        let alerts = (0..400).filter_map(|_| timer.tick()).count();
        assert_eq!(alerts, 1);
        assert_eq!(timer.seconds_remaining, 0);
        assert_eq!(timer.status, TimerStatus::Completed);
    }

    #[test]
    fn completion_alert_carries_reference_fact() {
        let mut timer = TimerState::with_duration(1);
        timer.toggle();
        let alert = timer.tick().expect("completion alert");
        assert_eq!(alert.kind, LogKind::Alert);
        assert!(alert.text.contains("Phobos"));
        assert!(alert.text.contains("2061"));
    }

    #[test]
    fn toggle_twice_from_idle() {
        let mut timer = TimerState::new();

        let first = timer.toggle();
        assert_eq!(timer.status, TimerStatus::Running);
        assert_eq!(first.kind, LogKind::Info);

        let second = timer.toggle();
        assert_eq!(timer.status, TimerStatus::Paused);
        assert_eq!(second.kind, LogKind::Warning);
    }

    #[test]
    fn ticks_are_ignored_unless_running() {
        let mut timer = TimerState::new();
        assert!(timer.tick().is_none());
        assert_eq!(timer.seconds_remaining, 300);

        timer.toggle();
        timer.tick();
        timer.toggle();
        timer.tick();
        assert_eq!(timer.status, TimerStatus::Paused);
        assert_eq!(timer.seconds_remaining, 299);
    }

    #[test]
    fn reset_from_any_state() {
        let mut idle = TimerState::new();
        let mut paused = running();
        paused.tick();
        paused.toggle();
        let mut mid_run = running();
        for _ in 0..42 {
            mid_run.tick();
        }
        let mut completed = running();
        for _ in 0..300 {
            completed.tick();
        }

        for timer in [&mut idle, &mut paused, &mut mid_run, &mut completed] {
            let entry = timer.reset();
            assert_eq!(entry.kind, LogKind::Info);
            assert_eq!(timer.status, TimerStatus::Idle);
            assert_eq!(timer.seconds_remaining, 300);
        }
    }

    #[test]
    fn toggle_after_completion_rearms() {
        let mut timer = TimerState::with_duration(2);
        timer.toggle();
        timer.tick();
        timer.tick();
        assert_eq!(timer.status, TimerStatus::Completed);

        timer.toggle();
        assert_eq!(timer.status, TimerStatus::Running);
        assert_eq!(timer.seconds_remaining, 2);
        assert!(timer.tick().is_none());
    }
}
