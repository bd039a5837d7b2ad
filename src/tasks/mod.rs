//! Background tasks module
//!
//! This module contains the periodic tasks that run alongside the HTTP server
//! and the scheduler that owns them.

pub mod countdown;
pub mod scene_animation;
pub mod scheduler;
pub mod status_poll;

// Re-export main functions
pub use countdown::countdown_task;
pub use scene_animation::scene_animation_task;
pub use scheduler::{Scheduler, TaskPeriods};
pub use status_poll::status_poll_task;
