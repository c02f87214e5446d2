//! stitch - load and render hosted table content from the command line.
//!
//! A thin wrapper over `stitch-core`: it mounts the content loader against
//! the configured table and prints the settled page.

mod cli;
mod commands;
mod config;
mod output;
mod render;
mod source;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};
use commands::{configure, pull, show, status};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.json_logs);

    match cli.command {
        Commands::Configure(args) => configure::run(args).await,
        Commands::Show(args) => show::run(args).await,
        Commands::Pull(args) => pull::run(args).await,
        Commands::Status(args) => status::run(args).await,
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    // Logs go to stderr so rendered pages on stdout stay clean.
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
