//! # Forecast Error Types
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │   Configuration        Transport            Response                    │
//! │   ─────────────        ─────────            ────────                    │
//! │   MissingApiKey        Request              Api (non-2xx)               │
//! │   InvalidConfig        Timeout              Decode                      │
//! │                                             EmptyResponse               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Result type alias for forecast operations.
pub type ForecastResult<T> = Result<T, ForecastError>;

#[derive(Debug, Error)]
pub enum ForecastError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Forecast API key not configured")]
    MissingApiKey,

    #[error("Invalid forecast configuration: {0}")]
    InvalidConfig(String),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    #[error("Forecast request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Forecast request timed out after {0} seconds")]
    Timeout(u64),

    // =========================================================================
    // Response Errors
    // =========================================================================
    /// The API answered with a non-success status.
    #[error("Forecast API returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Could not decode forecast response: {0}")]
    Decode(String),

    #[error("Forecast response contained no text")]
    EmptyResponse,
}

impl ForecastError {
    /// Whether retrying the same request later could succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            ForecastError::Timeout(_) | ForecastError::Request(_) => true,
            ForecastError::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}
