//! # Forecast Configuration
//!
//! The `[forecast]` section of the application config.
//!
//! ```toml
//! [forecast]
//! model = "gemini-2.5-flash"
//! endpoint = "https://generativelanguage.googleapis.com"
//! timeout_secs = 30
//! # api_key usually comes from GEMINI_API_KEY instead
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{ForecastError, ForecastResult};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Forecasting is disabled without a key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        ForecastConfig {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

// Keeps the key out of logs.
impl std::fmt::Debug for ForecastConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForecastConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ForecastConfig {
    /// The key, if one is set and not blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> ForecastResult<()> {
        if self.model.trim().is_empty() {
            return Err(ForecastError::InvalidConfig("model cannot be empty".to_string()));
        }
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(ForecastError::InvalidConfig(format!(
                "endpoint must be an http(s) URL, got '{}'",
                self.endpoint
            )));
        }
        if self.timeout_secs == 0 {
            return Err(ForecastError::InvalidConfig(
                "timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
