//! One-second countdown tick task

use std::{sync::Arc, time::Duration};
use tokio::time::{interval_at, Instant};
use tracing::{debug, error, info};

use crate::state::{AppState, TimerStatus};

/// Background task that ticks the countdown while the timer is running
///
/// The tick source only exists while the status is `Running` and is rebuilt on
/// every status change, so a pause/resume never leaves two intervals alive.
pub async fn countdown_task(state: Arc<AppState>, period: Duration) {
    info!("Starting countdown task");

    let mut status_rx = state.status_tx.subscribe();
    let teardown = state.teardown_token();

    loop {
        let status = *status_rx.borrow_and_update();

        if status == TimerStatus::Running {
            debug!("Timer running, starting {:?} tick source", period);
            let mut interval = interval_at(Instant::now() + period, period);

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        if let Err(e) = state.tick() {
                            error!("Failed to tick countdown: {}", e);
                        }
                    }

                    changed = status_rx.changed() => {
                        if changed.is_err() {
                            return;
                        }
                        debug!("Timer status changed, dropping tick source");
                        break;
                    }

                    _ = teardown.cancelled() => {
                        info!("Countdown task stopped");
                        return;
                    }
                }
            }
        } else {
            tokio::select! {
                changed = status_rx.changed() => {
                    if changed.is_err() {
                        return;
                    }
                }

                _ = teardown.cancelled() => {
                    info!("Countdown task stopped");
                    return;
                }
            }
        }
    }
}
