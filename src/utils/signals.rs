//! Signal handling for graceful shutdown

use signal_hook_tokio::Signals;
use futures::stream::StreamExt;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Wait for SIGTERM/SIGINT, or for `teardown` to be cancelled elsewhere
pub async fn shutdown_signal(teardown: CancellationToken) {
    let mut signals = match Signals::new([
        signal_hook::consts::SIGTERM,
        signal_hook::consts::SIGINT,
    ]) {
        Ok(signals) => signals,
        Err(e) => {
            warn!("Failed to install signal handler, waiting for teardown only: {}", e);
            teardown.cancelled().await;
            return;
        }
    };
    let handle = signals.handle();

    tokio::select! {
        Some(signal) = signals.next() => {
            info!("Received signal: {}", signal);
        }
        _ = teardown.cancelled() => {
            info!("Console torn down");
        }
    }

    handle.close();
}
