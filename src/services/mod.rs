//! External service integration module
//!
//! This module contains the generative status-text client used to feed
//! the console log.

pub mod status_text;

// Re-export main types
pub use status_text::{
    build_prompt, GenerativeConfig, GenerativeTextFetcher, StatusTextSource, FALLBACK_STATUS,
};
