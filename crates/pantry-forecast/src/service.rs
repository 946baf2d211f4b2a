//! # Forecast Service
//!
//! What the reports view calls. Always returns displayable text: failures
//! are logged and replaced by a fixed message.

use chrono::NaiveDate;
use pantry_core::report::forecast_prompt;
use pantry_core::InventoryItem;
use std::sync::Arc;
use tracing::{error, warn};

use crate::client::{Forecaster, GeminiForecaster};
use crate::config::ForecastConfig;
use crate::error::ForecastResult;

pub const DISABLED_MESSAGE: &str = "AI features are disabled. Please configure your API key.";
pub const FAILURE_MESSAGE: &str =
    "There was an error generating the AI forecast. Please check the logs for details.";

#[derive(Clone, Default)]
pub struct ForecastService {
    forecaster: Option<Arc<dyn Forecaster>>,
}

impl ForecastService {
    pub fn new(forecaster: Arc<dyn Forecaster>) -> Self {
        ForecastService {
            forecaster: Some(forecaster),
        }
    }

    pub fn disabled() -> Self {
        ForecastService { forecaster: None }
    }

    /// Gemini-backed when a key is configured, disabled otherwise.
    pub fn from_config(config: &ForecastConfig) -> ForecastResult<Self> {
        if config.api_key().is_none() {
            warn!("Forecast API key not set; AI features will be disabled");
            return Ok(Self::disabled());
        }
        Ok(Self::new(Arc::new(GeminiForecaster::new(config)?)))
    }

    pub fn is_enabled(&self) -> bool {
        self.forecaster.is_some()
    }

    /// Forecast for the given inventory as of `today`.
    pub async fn forecast(&self, items: &[InventoryItem], today: NaiveDate) -> String {
        self.generate(&forecast_prompt(items, today)).await
    }

    pub async fn generate(&self, prompt: &str) -> String {
        let Some(forecaster) = &self.forecaster else {
            return DISABLED_MESSAGE.to_string();
        };

        match forecaster.generate(prompt).await {
            Ok(text) => text,
            Err(err) => {
                error!(error = %err, transient = err.is_transient(), "Demand forecast failed");
                FAILURE_MESSAGE.to_string()
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
