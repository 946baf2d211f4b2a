//! # CLI Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  REPL line ──► command handler ──► Result<_, CliError>                  │
//! │                                        │                                │
//! │              Core / Usage ─────────────┼──► printed inline, session     │
//! │              (user mistakes)           │    keeps running               │
//! │                                        │                                │
//! │              Config / Io at startup ───┴──► logged, exit code 1         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use thiserror::Error;

use pantry_core::CoreError;
use pantry_forecast::ForecastError;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },

    #[error(transparent)]
    Forecast(#[from] ForecastError),
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Forecast(#[from] ForecastError),

    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),

    /// A malformed session command.
    #[error("{0}")]
    Usage(String),
}

impl CliError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CliError::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the session can carry on after printing this error.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, CliError::Output(_) | CliError::Config(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_pass_through() {
        let err: CliError = CoreError::ItemNotFound(7).into();
        assert_eq!(err.to_string(), CoreError::ItemNotFound(7).to_string());
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_output_errors_end_the_session() {
        let err: CliError = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed").into();
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_io_error_names_path() {
        let err = CliError::io(
            "stock.csv",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert_eq!(err.to_string(), "stock.csv: missing");
    }
}
