//! Pull command implementation.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Args;

use stitch_core::{ContentSource, ServiceUrl};
use stitch_file::SnapshotStore;

use crate::config::{self, TargetArgs};
use crate::output;
use crate::source::CliSource;

#[derive(Args, Debug)]
pub struct PullArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Snapshot directory as a file:// URL
    #[arg(long)]
    pub into: String,

    /// Give up on the request after this many seconds (default: wait forever)
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

pub async fn run(args: PullArgs) -> Result<()> {
    let destination = ServiceUrl::new(&args.into).context("Invalid snapshot URL")?;
    let root = match destination.to_file_path() {
        Some(root) => root,
        None => bail!("Snapshot destination must be a file:// URL"),
    };

    let settings = config::resolve(&args.target)?;
    let source = CliSource::open(&settings, args.timeout_secs.map(Duration::from_secs))?;

    output::notice(&format!("Fetching {}...", source.table()));

    let records = source
        .fetch_records()
        .await
        .context("Failed to fetch records")?;

    let table = source.table();
    let path = SnapshotStore::new(root)
        .write_snapshot(&table.base, &table.table, &records)
        .await
        .context("Failed to write snapshot")?;

    output::success(&format!("Saved {} records", records.len()));
    output::field("Snapshot", &path.display().to_string());

    Ok(())
}
