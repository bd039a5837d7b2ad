//! Orbital Countdown - a countdown console with a celestial backdrop
//!
//! This is the main entry point for the orbital-countdown server.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use orbital_countdown::{
    api::create_router,
    config::Config,
    services::{GenerativeTextFetcher, StatusTextSource},
    state::AppState,
    tasks::Scheduler,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("orbital_countdown={},tower_http=info", config.log_level()))
        .init();

    info!("Starting orbital-countdown server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, duration={}s, poll={}s, fps={}, model={}",
          config.host, config.port, config.duration, config.poll_interval, config.fps, config.model);

    if config.api_key.is_none() {
        warn!("No API key configured, status log will use fallback text");
    }

    let fetcher: Arc<dyn StatusTextSource> = Arc::new(GenerativeTextFetcher::new(config.generative()));
    let state = Arc::new(AppState::new(config.duration, config.display_mode(), fetcher));

    // Start countdown, status poll and scene animation tasks
    let mut scheduler = Scheduler::new(Arc::clone(&state), config.task_periods());
    scheduler.start_all();

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /toggle       - Start, resume or pause the countdown");
    info!("  POST /reset        - Reset the countdown");
    info!("  GET  /status       - Timer, status log and display mode");
    info!("  GET  /scene        - Current scene frame");
    info!("  POST /viewport     - Resize the scene viewport");
    info!("  POST /pointer      - Parallax pointer input");
    info!("  POST /display-mode - Toggle light/dark mode");
    info!("  GET  /bodies       - Celestial reference table");
    info!("  GET  /health       - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state.teardown_token()));

    if let Err(e) = server.await {
        tracing::error!("Server error: {}", e);
    }

    scheduler.shutdown();
    info!("Server shutdown complete");
    Ok(())
}
