mod cli;
mod commands;
mod config;
mod inputs;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "simdb=debug" } else { "simdb=info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Build {
            inputs,
            output,
            pretty,
        } => {
            commands::build::handle(&inputs, &output, pretty)?;
        }

        Commands::Stats { database } => {
            commands::stats::handle(&database)?;
        }

        Commands::Talents { input } => {
            commands::talents::handle(&input)?;
        }
    }

    Ok(())
}
