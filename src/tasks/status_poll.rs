//! Periodic status-text poll

use std::{sync::Arc, time::Duration};
use tokio::time::{interval_at, Instant};
use tracing::{debug, error, info};

use crate::state::AppState;

/// Background task that requests a generated status line every `period`
///
/// Runs for the whole lifetime of the console; whether a fetch actually
/// happens is decided by [`AppState::poll_status`] at fire time. A slow fetch
/// does not hold back the next one.
pub async fn status_poll_task(state: Arc<AppState>, period: Duration) {
    info!("Starting status poll task (every {:?})", period);

    let teardown = state.teardown_token();
    let mut interval = interval_at(Instant::now() + period, period);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                match state.poll_status() {
                    Ok(Some(_)) => debug!("Status fetch dispatched"),
                    Ok(None) => {}
                    Err(e) => error!("Status poll failed: {}", e),
                }
            }

            _ = teardown.cancelled() => {
                info!("Status poll task stopped");
                return;
            }
        }
    }
}
