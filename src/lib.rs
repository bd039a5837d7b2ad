//! Orbital Countdown - a countdown console with a celestial backdrop
//!
//! This library provides the countdown state machine, the bounded status log,
//! the scene animation clock, the generated status-text client and the
//! background tasks and HTTP API that tie them together.

pub mod api;
pub mod celestial;
pub mod config;
pub mod services;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::AppState;
pub use api::create_router;
pub use tasks::Scheduler;
pub use utils::signals::shutdown_signal;
