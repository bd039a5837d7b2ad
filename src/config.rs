//! Configuration and CLI argument handling

use std::time::Duration;
use clap::Parser;

use crate::{services::GenerativeConfig, state::DisplayMode, tasks::TaskPeriods};

/// CLI argument parsing structure
#[derive(Parser, Debug, Clone)]
#[command(name = "orbital-countdown")]
#[command(about = "A countdown console server with an orbital scene clock and a generated status log")]
#[command(version = "1.0.0")]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Countdown duration in seconds
    #[arg(short, long, default_value = "300")]
    pub duration: u64,

    /// Seconds between status text requests
    #[arg(long, default_value = "40")]
    pub poll_interval: u64,

    /// Scene animation frames per second
    #[arg(long, default_value = "60")]
    pub fps: u32,

    /// Generative model identifier
    #[arg(long, default_value = "gemini-2.5-flash")]
    pub model: String,

    /// Base URL of the generative text API
    #[arg(long, default_value = "https://generativelanguage.googleapis.com/v1beta")]
    pub api_base: String,

    /// API key for the generative text service; status text falls back when unset
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Output length cap for generated status text
    #[arg(long, default_value = "60")]
    pub max_output_tokens: u32,

    /// Sampling temperature for generated status text
    #[arg(long, default_value = "0.9")]
    pub temperature: f32,

    /// Status request timeout in seconds
    #[arg(long, default_value = "10")]
    pub request_timeout: u64,

    /// Start in dark display mode
    #[arg(long)]
    pub dark: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn display_mode(&self) -> DisplayMode {
        if self.dark { DisplayMode::Dark } else { DisplayMode::Light }
    }

    pub fn task_periods(&self) -> TaskPeriods {
        TaskPeriods::new(self.poll_interval, self.fps)
    }

    /// Settings handed to the status text fetcher
    pub fn generative(&self) -> GenerativeConfig {
        GenerativeConfig {
            api_base: self.api_base.clone(),
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            max_output_tokens: self.max_output_tokens,
            temperature: self.temperature,
            timeout: Duration::from_secs(self.request_timeout),
        }
    }
}
