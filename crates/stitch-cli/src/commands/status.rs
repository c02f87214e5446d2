//! Status command implementation.

use anyhow::Result;
use clap::Args;

use crate::config::{self, TOKEN_ENV, TargetArgs, TokenOrigin, storage};
use crate::output;

#[derive(Args, Debug)]
pub struct StatusArgs {
    #[command(flatten)]
    pub target: TargetArgs,
}

pub async fn run(args: StatusArgs) -> Result<()> {
    let settings = config::resolve(&args.target)?;

    let token = match settings.token_origin {
        TokenOrigin::Environment => format!("set (from {})", TOKEN_ENV),
        TokenOrigin::Stored => "set (stored)".to_string(),
        TokenOrigin::Missing => "missing".to_string(),
    };

    output::field("Service", settings.table.service.as_str());
    output::field("Base", settings.table.base.as_str());
    output::field("Table", settings.table.table.as_str());
    output::field("Endpoint", settings.table.records_url()?.as_str());
    output::field("Token", &token);
    output::field(
        "Fields",
        &format!(
            "title={}, body={}, media={}, cover={}, published={}",
            settings.fields.title,
            settings.fields.body,
            settings.fields.media,
            settings.fields.cover,
            settings.fields.published_at
        ),
    );
    output::field("Config", &storage::config_path()?.display().to_string());

    Ok(())
}
