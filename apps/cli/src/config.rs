//! # Application Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                            │
//! │     PANTRY_STORE_NAME, PANTRY_CURRENCY_SYMBOL                           │
//! │     PANTRY_FORECAST_MODEL, PANTRY_FORECAST_ENDPOINT,                    │
//! │     PANTRY_FORECAST_TIMEOUT_SECS, GEMINI_API_KEY (or API_KEY)           │
//! │                                                                         │
//! │  2. TOML Config File                                                    │
//! │     --config FILE, else the platform config dir:                        │
//! │     ~/.config/pantry/pantry.toml (Linux)                                │
//! │     ~/Library/Application Support/com.pantry.pantry/pantry.toml (macOS) │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [store]
//! name = "Spice Route Kitchen"
//! currency_symbol = "₹"
//!
//! [forecast]
//! model = "gemini-2.5-flash"
//! timeout_secs = 30
//! ```

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use pantry_forecast::ForecastConfig;

use crate::error::ConfigError;

pub const CONFIG_FILE_NAME: &str = "pantry.toml";

// =============================================================================
// Sections
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Shown in the dashboard header.
    pub name: String,

    /// Prefix for every money amount in the views.
    pub currency_symbol: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            name: "Pantry".to_string(),
            currency_symbol: "₹".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub forecast: ForecastConfig,
}

// =============================================================================
// Loading
// =============================================================================

impl AppConfig {
    /// Defaults, then the file, then the process environment.
    ///
    /// An explicit `path` must exist; the default location may be absent.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => {
                    debug!("No config file found, using defaults");
                    AppConfig::default()
                }
            },
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Applies environment overrides read through `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(name) = lookup("PANTRY_STORE_NAME") {
            self.store.name = name;
        }
        if let Some(symbol) = lookup("PANTRY_CURRENCY_SYMBOL") {
            self.store.currency_symbol = symbol;
        }
        if let Some(model) = lookup("PANTRY_FORECAST_MODEL") {
            self.forecast.model = model;
        }
        if let Some(endpoint) = lookup("PANTRY_FORECAST_ENDPOINT") {
            self.forecast.endpoint = endpoint;
        }
        if let Some(secs) = lookup("PANTRY_FORECAST_TIMEOUT_SECS") {
            self.forecast.timeout_secs =
                secs.trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue {
                        key: "PANTRY_FORECAST_TIMEOUT_SECS".to_string(),
                        reason: format!("'{}' is not a whole number of seconds", secs),
                    })?;
        }
        if let Some(key) = lookup("GEMINI_API_KEY").or_else(|| lookup("API_KEY")) {
            self.forecast.api_key = Some(key);
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "store.name".to_string(),
                reason: "cannot be empty".to_string(),
            });
        }
        self.forecast.validate()?;
        Ok(())
    }
}

/// `<platform config dir>/pantry.toml`, if the platform has one.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "pantry", "pantry").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

// =============================================================================
// Unit Tests
// =============================================================================
