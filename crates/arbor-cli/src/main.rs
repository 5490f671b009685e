//! Arbor CLI
//!
//! Checks permissions against a fixture-backed Arbor ACL.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use anyhow::Result;
use clap::Parser;

use arbor_cli::cli::{Cli, Command};
use arbor_cli::commands::{cmd_check, cmd_locate};
use arbor_cli::config::ArborConfig;
use arbor_cli::config_handlers::handle_config_command;
use arbor_cli::logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    // Config commands run without loading the config file.
    if let Command::Config { action } = &cli.command {
        logging::init(cli.verbose, "warn");
        return Ok(handle_config_command(config_path, action)?);
    }

    let config = ArborConfig::load(config_path)?;
    logging::init(cli.verbose, &config.logging.level);
    tracing::debug!(config = ?config_path, "configuration loaded");

    let outcome = match &cli.command {
        Command::Check(args) => cmd_check(args, &config)
            .await
            .and_then(|outcome| outcome.render(args.json))
            .map(Some),
        Command::Locate(args) => cmd_locate(args, &config).await.map(|found| {
            Some(found.map_or_else(|| "not found".to_string(), |id| id.to_string()))
        }),
        Command::Config { .. } => Ok(None),
    };

    match outcome {
        Ok(Some(output)) => {
            println!("{output}");
            Ok(())
        }
        Ok(None) => Ok(()),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
