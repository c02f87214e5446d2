//! Show command implementation.

use std::time::Duration;

use anyhow::{Result, bail};
use clap::{Args, ValueEnum};

use stitch_core::view::LOADING_NOTICE;
use stitch_core::{ContentLoader, ContentSource, PageView, TimeZoneMode, ViewOptions};

use crate::config::{self, TargetArgs};
use crate::output;
use crate::render;
use crate::source::CliSource;

#[derive(Args, Debug)]
pub struct ShowArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Zone for creation timestamps
    #[arg(long, value_enum, default_value_t = Zone::Utc)]
    pub timezone: Zone,

    /// Give up on the request after this many seconds (default: wait forever)
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
    Html,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Zone {
    Utc,
    Local,
}

impl From<Zone> for TimeZoneMode {
    fn from(zone: Zone) -> Self {
        match zone {
            Zone::Utc => TimeZoneMode::Utc,
            Zone::Local => TimeZoneMode::Local,
        }
    }
}

pub async fn run(args: ShowArgs) -> Result<()> {
    let settings = config::resolve(&args.target)?;
    let source = CliSource::open(&settings, args.timeout_secs.map(Duration::from_secs))?;
    let table = source.table().to_string();

    let options = ViewOptions {
        fields: settings.fields,
        time_zone: args.timezone.into(),
    };

    let loader = ContentLoader::new(source);
    let mut mounted = loader.mount();

    if mounted.state().is_loading() {
        output::notice(LOADING_NOTICE);
    }

    let state = mounted.settled().await;
    let page = PageView::from_state(&state, &options);

    match args.format {
        Format::Text => print!("{}", render::text(&page)),
        Format::Json => output::json_pretty(&page)?,
        Format::Html => print!("{}", render::html(&page)),
    }

    if page.is_error() {
        bail!("Failed to load table {}", table);
    }

    Ok(())
}
