//! # Forecaster Client
//!
//! `Forecaster` is the seam between the app and the model: prompt in, text
//! out. `GeminiForecaster` talks to the Generative Language REST API.
//!
//! ## Wire Format
//! ```text
//! POST {endpoint}/v1beta/models/{model}:generateContent
//! x-goog-api-key: <key>
//!
//! {"contents":[{"parts":[{"text":"<prompt>"}]}]}
//!
//! 200 → {"candidates":[{"content":{"parts":[{"text":"..."},...]}}]}
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

use crate::config::ForecastConfig;
use crate::error::{ForecastError, ForecastResult};

#[async_trait]
pub trait Forecaster: Send + Sync {
    async fn generate(&self, prompt: &str) -> ForecastResult<String>;
}

// =============================================================================
// Request / Response Bodies
// =============================================================================

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

impl<'a> GenerateRequest<'a> {
    fn new(prompt: &'a str) -> Self {
        GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Text parts of the first candidate, concatenated.
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

// =============================================================================
// Gemini
// =============================================================================

pub struct GeminiForecaster {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
    timeout_secs: u64,
}

impl GeminiForecaster {
    /// Fails with `MissingApiKey` when the config has no usable key.
    pub fn new(config: &ForecastConfig) -> ForecastResult<Self> {
        config.validate()?;
        let api_key = config.api_key().ok_or(ForecastError::MissingApiKey)?.to_string();

        let client = reqwest::Client::builder().timeout(config.timeout()).build()?;

        Ok(GeminiForecaster {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
            timeout_secs: config.timeout_secs,
        })
    }

    fn url(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.endpoint, self.model)
    }

    fn transport_error(&self, err: reqwest::Error) -> ForecastError {
        if err.is_timeout() {
            ForecastError::Timeout(self.timeout_secs)
        } else {
            ForecastError::Request(err)
        }
    }
}

#[async_trait]
impl Forecaster for GeminiForecaster {
    #[instrument(skip(self, prompt), fields(model = %self.model))]
    async fn generate(&self, prompt: &str) -> ForecastResult<String> {
        let started = Instant::now();
        debug!(prompt_chars = prompt.len(), "Requesting forecast");

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&GenerateRequest::new(prompt))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Forecast API rejected request");
            return Err(ForecastError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ForecastError::Decode(e.to_string()))?;
        let text = parsed.into_text().ok_or(ForecastError::EmptyResponse)?;

        info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            chars = text.len(),
            "Forecast received"
        );
        Ok(text)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
