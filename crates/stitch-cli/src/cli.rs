//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands::{configure, pull, show, status};

/// Load and render content from a hosted table.
#[derive(Parser, Debug)]
#[command(name = "stitch")]
#[command(author, version = env!("STITCH_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Save the table address, token and column names
    Configure(configure::ConfigureArgs),

    /// Load the table once and print the page
    Show(show::ShowArgs),

    /// Save a snapshot of the table for offline use
    Pull(pull::PullArgs),

    /// Display the effective configuration
    Status(status::StatusArgs),
}
