//! # pantry-forecast: Demand Forecast Client
//!
//! Turns the current inventory into recommendations from a hosted
//! text-generation model.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  items ──► report::forecast_prompt ──► Forecaster::generate ──► text    │
//! │                                               │                         │
//! │                                   error ──────┴──► fixed user message   │
//! │                                                    (logged, never       │
//! │                                                     propagated)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`client`] - `Forecaster` trait and the Gemini HTTP implementation
//! - [`config`] - model, endpoint, key and timeout
//! - [`error`] - forecast error types
//! - [`service`] - `ForecastService`, the view-facing wrapper

pub mod client;
pub mod config;
pub mod error;
pub mod service;

pub use client::{Forecaster, GeminiForecaster};
pub use config::ForecastConfig;
pub use error::{ForecastError, ForecastResult};
pub use service::{ForecastService, DISABLED_MESSAGE, FAILURE_MESSAGE};
