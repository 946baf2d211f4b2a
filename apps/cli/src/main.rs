//! # Pantry Entry Point
//!
//! `pantry` starts an interactive session; `pantry template` prints the
//! import template. Setup lives in the library for testability.

use clap::Parser;
use std::process::ExitCode;
use tracing::error;

use pantry_cli::{init_tracing, run, Cli};

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "pantry exited with an error");
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
