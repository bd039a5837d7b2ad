//! Generated status text for the console log
//!
//! Best effort only: every failure collapses into [`FALLBACK_STATUS`].

use std::{fmt, time::Duration};
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::celestial::{moon_periods, COMETS, SPACECRAFT};

/// Shown whenever the generative service cannot be used
pub const FALLBACK_STATUS: &str = "SIGNAL LOST // telemetry buffer empty, awaiting next uplink window";

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Anything that can produce a status line for the log
pub trait StatusTextSource: Send + Sync {
    fn fetch(&self, seconds_remaining: u64) -> BoxFuture<'_, String>;
}

/// Settings for the generative text service, passed in at construction
#[derive(Debug, Clone)]
pub struct GenerativeConfig {
    pub api_base: String,
    pub api_key: Option<String>,
    pub model: String,
    pub max_output_tokens: u32,
    pub temperature: f32,
    pub timeout: Duration,
}

#[derive(Debug)]
enum FetchError {
    MissingCredential,
    Transport(String),
    Service(u16, String),
    EmptyReply,
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::MissingCredential => write!(f, "no API key configured"),
            FetchError::Transport(e) => write!(f, "request failed: {}", e),
            FetchError::Service(status, body) => write!(f, "service returned {}: {}", status, body),
            FetchError::EmptyReply => write!(f, "service returned no text"),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateResponse {
    fn into_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .find_map(|part| part.text)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
    }
}

/// Build the prompt for the current countdown position
pub fn build_prompt(seconds_remaining: u64) -> String {
    let minutes = seconds_remaining / 60;
    let seconds = seconds_remaining % 60;

    let moons = moon_periods()
        .map(|(name, period)| format!("{} orbits every {}", name, period))
        .collect::<Vec<_>>()
        .join("; ");
    let comets = COMETS
        .iter()
        .map(|comet| format!("{} returns {}", comet.name, comet.next_perihelion_year))
        .collect::<Vec<_>>()
        .join("; ");

    format!(
        "You are the onboard computer of a deep-space observation console. \
         Write one cryptic, terse status log line (max 20 words, no quotes). \
         Countdown: {} minutes {} seconds remaining. \
         Reference data: {}. Comets: {}. {} is {:.1} billion km out, moving at {:.1} km/s.",
        minutes,
        seconds,
        moons,
        comets,
        SPACECRAFT.name,
        SPACECRAFT.distance_km / 1e9,
        SPACECRAFT.speed_km_s,
    )
}

/// Status source backed by a `generateContent` style HTTP API
pub struct GenerativeTextFetcher {
    client: reqwest::Client,
    config: GenerativeConfig,
}

impl GenerativeTextFetcher {
    pub fn new(config: GenerativeConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!("Failed to build HTTP client with timeout, using defaults: {}", e);
                reqwest::Client::new()
            });
        Self { client, config }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.api_base.trim_end_matches('/'),
            self.config.model
        )
    }

    async fn request(&self, seconds_remaining: u64) -> Result<String, FetchError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(FetchError::MissingCredential)?;

        let prompt = build_prompt(seconds_remaining);
        let body = GenerateRequest {
            contents: vec![Content { parts: vec![Part { text: &prompt }] }],
            generation_config: GenerationConfig {
                max_output_tokens: self.config.max_output_tokens,
                temperature: self.config.temperature,
            },
        };

        debug!("Requesting status text from {}", self.config.model);
        let response = self
            .client
            .post(self.endpoint())
            .header(API_KEY_HEADER, api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(FetchError::Service(status.as_u16(), text));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| FetchError::Transport(e.without_url().to_string()))?;

        parsed.into_text().ok_or(FetchError::EmptyReply)
    }
}

impl StatusTextSource for GenerativeTextFetcher {
    fn fetch(&self, seconds_remaining: u64) -> BoxFuture<'_, String> {
        Box::pin(async move {
            match self.request(seconds_remaining).await {
                Ok(text) => text,
                Err(FetchError::MissingCredential) => {
                    debug!("No API key configured, using fallback status");
                    FALLBACK_STATUS.to_string()
                }
                Err(e) => {
                    warn!("Status text fetch failed: {}", e);
                    FALLBACK_STATUS.to_string()
                }
            }
        })
    }
}
