use std::io;

use anyhow::{Context, Result};
use chrono::Duration;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use dt_cli::commands::{events, open_log, report};
use dt_cli::{Cli, Commands, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    match &cli.command {
        Some(Commands::Report {
            log,
            json,
            threshold_minutes,
        }) => {
            let config = Config::load_from(cli.config.as_deref())
                .context("failed to load configuration")?;
            tracing::debug!(?config, "loaded configuration");

            let threshold = threshold_minutes.map_or_else(
                || config.visibility_threshold(),
                |minutes| Duration::minutes(i64::from(minutes)),
            );
            let options = report::ReportOptions {
                json: *json,
                threshold,
            };
            let reader = open_log(log.as_deref())?;
            report::run(reader, &mut io::stdout().lock(), &config, options)?;
        }
        Some(Commands::Events { log }) => {
            // Events doesn't need config - just decodes and prints
            let reader = open_log(log.as_deref())?;
            events::run(reader, &mut io::stdout().lock())?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
