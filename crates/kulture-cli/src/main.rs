//! Kulture CLI - Command-line interface
//!
//! Terminal adapter over the navigation session and region aggregator.

mod cli;
mod commands;
mod config_loader;
mod display;
mod errors;
mod interactive;
mod output;
mod output_types;
mod progress;
mod storage;

use clap::Parser;
use cli::Cli;
use errors::CliError;
use std::process::ExitCode;

fn main() -> ExitCode {
    // Logs go to stderr so --json output stays parseable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            CliError::new("Failed to start async runtime").with_context(e.to_string()).display();
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(commands::execute(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast::<CliError>() {
                Ok(cli_error) => cli_error.display(),
                Err(other) => errors::from_anyhow(other).display(),
            }
            ExitCode::FAILURE
        }
    }
}
