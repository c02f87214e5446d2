//! Configure command implementation.

use anyhow::{Context, Result};
use clap::Args;

use stitch_core::{ApiToken, BaseId, ServiceUrl, TableName};

use crate::config::storage;
use crate::output;

#[derive(Args, Debug)]
pub struct ConfigureArgs {
    /// Service base URL (https://..., or file:///dir for snapshots)
    #[arg(long)]
    pub service: Option<String>,

    /// Base ID
    #[arg(long)]
    pub base: Option<String>,

    /// Table name
    #[arg(long)]
    pub table: Option<String>,

    /// Access token to store (prefer the STITCH_TOKEN environment variable)
    #[arg(long)]
    pub token: Option<String>,

    /// Remove the stored access token
    #[arg(long, conflicts_with = "token")]
    pub forget_token: bool,

    /// Column holding the title
    #[arg(long)]
    pub title_field: Option<String>,

    /// Column holding the body text
    #[arg(long)]
    pub body_field: Option<String>,

    /// Column holding video attachments
    #[arg(long)]
    pub media_field: Option<String>,

    /// Column holding cover image attachments
    #[arg(long)]
    pub cover_field: Option<String>,

    /// Column holding the publication date
    #[arg(long)]
    pub published_field: Option<String>,
}

pub async fn run(args: ConfigureArgs) -> Result<()> {
    let mut config = storage::load_config()
        .context("Failed to load config")?
        .unwrap_or_default();

    if let Some(service) = args.service {
        ServiceUrl::new(&service).context("Invalid service URL")?;
        config.service = Some(service);
    }

    if let Some(base) = args.base {
        BaseId::new(base.as_str()).context("Invalid base ID")?;
        config.base_id = Some(base);
    }

    if let Some(table) = args.table {
        TableName::new(table.as_str()).context("Invalid table name")?;
        config.table = Some(table);
    }

    if let Some(token) = args.token {
        let token = ApiToken::new(token).context("Invalid access token")?;
        config.token = Some(token.expose().to_string());
    } else if args.forget_token {
        config.token = None;
    }

    let fields = &mut config.fields;
    for (value, slot) in [
        (args.title_field, &mut fields.title),
        (args.body_field, &mut fields.body),
        (args.media_field, &mut fields.media),
        (args.cover_field, &mut fields.cover),
        (args.published_field, &mut fields.published_at),
    ] {
        if let Some(value) = value {
            *slot = value;
        }
    }

    let path = storage::save_config(&config).context("Failed to save config")?;

    output::success("Configuration saved");
    output::field("Config", &path.display().to_string());

    Ok(())
}
