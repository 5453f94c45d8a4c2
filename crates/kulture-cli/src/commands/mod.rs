//! Command implementations

mod browse;
mod config;
mod db;
mod details;
mod events;
mod guide;
mod map;
mod regions;

use crate::cli::{Cli, Commands};
use crate::config_loader::load_config;
use crate::output::OutputWriter;
use anyhow::Result;

/// Execute a CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);
    let config = load_config(&cli)?;

    match cli.command {
        Commands::Regions => regions::execute(&config, &output).await,
        Commands::Map(args) => map::execute(args, &config, &output).await,
        Commands::Details(args) => details::execute(args, &config, &output).await,
        Commands::Events(args) => events::execute(args, &config, &output).await,
        Commands::Guide => guide::execute(&output),
        Commands::Browse => browse::execute(&config, &output).await,
        Commands::Config => config::execute(&config, &output),
        Commands::Db(args) => db::execute(args, &config, &output).await,
    }
}
