//! Frame loop for the celestial backdrop

use std::{sync::Arc, time::Duration};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info};

use crate::state::AppState;

/// Background task that advances the scene clock once per frame
pub async fn scene_animation_task(state: Arc<AppState>, frame: Duration) {
    info!("Starting scene animation task ({:?} per frame)", frame);

    let teardown = state.teardown_token();
    let mut interval = interval(frame);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                if let Err(e) = state.advance_scene() {
                    error!("Failed to advance scene: {}", e);
                }
            }

            _ = teardown.cancelled() => {
                info!("Scene animation task stopped");
                return;
            }
        }
    }
}
