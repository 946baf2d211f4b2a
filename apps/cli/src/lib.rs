//! # Pantry CLI
//!
//! Interactive inventory session for a food-service kitchen: stock, billing,
//! suppliers, purchase orders, reports and an AI demand forecast.
//!
//! ## Module Organization
//! ```text
//! pantry_cli/
//! ├── lib.rs        ◄─── You are here (top-level CLI, startup)
//! ├── config.rs     ◄─── pantry.toml + environment overrides
//! ├── error.rs      ◄─── CliError, ConfigError
//! ├── render.rs     ◄─── text tables and value formatting
//! ├── state/        ◄─── Session (owns StoreState)
//! └── commands/     ◄─── one handler per session command
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. init_tracing       RUST_LOG or "info,pantry=debug", to stderr       │
//! │  2. AppConfig::load    defaults → pantry.toml → environment             │
//! │  3. ForecastService    disabled when no API key is configured           │
//! │  4. Session::system    empty store, timestamp ids, wall clock           │
//! │  5. --seed / --import  optional starting inventory                      │
//! │  6. Shell::run         one command per line until quit or EOF           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod render;
pub mod state;

use clap::{Args, Parser, Subcommand};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pantry_core::catalog::DEMO_ITEM_NAMES;
use pantry_forecast::ForecastService;

use crate::commands::{transfer, Shell};
use crate::config::AppConfig;
use crate::error::CliResult;
use crate::state::Session;

#[derive(Debug, Parser)]
#[command(name = "pantry", version, about = "Inventory and billing for food-service kitchens")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<TopCommand>,
}

#[derive(Debug, Subcommand)]
pub enum TopCommand {
    /// Start an interactive session (the default)
    Session(SessionArgs),

    /// Print or save the CSV import template
    Template {
        /// Write to this file instead of printing
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Default, Args)]
pub struct SessionArgs {
    /// Start with the demo inventory instead of an empty store
    #[arg(long)]
    pub seed: bool,

    /// Import this CSV file before the first prompt
    #[arg(long, value_name = "FILE")]
    pub import: Option<PathBuf>,

    /// Config file (defaults to the platform config directory)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Runs the parsed command line to completion.
pub async fn run(cli: Cli) -> CliResult<()> {
    match cli.command {
        Some(TopCommand::Template { output }) => {
            transfer::template(output.as_deref(), &mut io::stdout().lock())
        }
        Some(TopCommand::Session(args)) => run_session(args).await,
        None => run_session(SessionArgs::default()).await,
    }
}

async fn run_session(args: SessionArgs) -> CliResult<()> {
    let config = AppConfig::load(args.config.as_deref())?;
    let forecast = ForecastService::from_config(&config.forecast)?;
    info!(
        store = %config.store.name,
        forecast = forecast.is_enabled(),
        "Configuration loaded"
    );

    let mut session = Session::system();
    if args.seed {
        session.seed(DEMO_ITEM_NAMES);
    }

    let mut shell = Shell::new(session, forecast, config.store);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Some(path) = args.import {
        let import = transfer::ImportArgs { path, maps: Vec::new() };
        transfer::import(&mut shell, &import, &mut out)?;
    }

    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    shell.run(stdin.lock(), &mut out, interactive).await
}

/// Installs the global subscriber. `RUST_LOG` overrides the default filter.
///
/// Logs go to stderr so they never mix with command output.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,pantry=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_session() {
        let cli = Cli::try_parse_from(["pantry"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_session_flags() {
        let cli = Cli::try_parse_from(["pantry", "session", "--seed", "--import", "stock.csv"]).unwrap();
        match cli.command {
            Some(TopCommand::Session(args)) => {
                assert!(args.seed);
                assert_eq!(args.import, Some(PathBuf::from("stock.csv")));
                assert_eq!(args.config, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_template_output() {
        let cli = Cli::try_parse_from(["pantry", "template", "-o", "template.csv"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(TopCommand::Template { output: Some(ref p) }) if p == &PathBuf::from("template.csv")
        ));
    }

    #[tokio::test]
    async fn test_missing_explicit_config_fails() {
        let args = SessionArgs {
            config: Some(PathBuf::from("/nonexistent/pantry.toml")),
            ..SessionArgs::default()
        };
        let err = run_session(args).await.unwrap_err();
        assert!(!err.is_recoverable());
    }
}
