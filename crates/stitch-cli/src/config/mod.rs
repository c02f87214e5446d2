//! Effective configuration: stored config merged with flags and environment.

pub mod storage;

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use stitch_core::{ApiToken, BaseId, FieldNames, ServiceUrl, TableName, TableRef};

/// Environment variable holding the access token.
pub const TOKEN_ENV: &str = "STITCH_TOKEN";

/// Flags selecting the table; each falls back to the stored config.
#[derive(Args, Debug, Clone, Default)]
pub struct TargetArgs {
    /// Service base URL (https://..., or file:///dir for snapshots)
    #[arg(long, env = "STITCH_SERVICE")]
    pub service: Option<String>,

    /// Base ID
    #[arg(long, env = "STITCH_BASE")]
    pub base: Option<String>,

    /// Table name
    #[arg(long, env = "STITCH_TABLE")]
    pub table: Option<String>,
}

/// Where the access token came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenOrigin {
    Environment,
    Stored,
    Missing,
}

/// Configuration for one command run.
#[derive(Debug)]
pub struct Settings {
    pub table: TableRef,
    pub token: Option<ApiToken>,
    pub token_origin: TokenOrigin,
    pub fields: FieldNames,
}

/// Merge flags, environment and stored config.
pub fn resolve(args: &TargetArgs) -> Result<Settings> {
    let stored = storage::load_config()
        .context("Failed to load config")?
        .unwrap_or_default();

    let service = match args.service.as_deref().or(stored.service.as_deref()) {
        Some(s) => ServiceUrl::new(s).context("Invalid service URL")?,
        None => ServiceUrl::default(),
    };

    let base = args
        .base
        .clone()
        .or(stored.base_id)
        .context("No base ID. Pass --base or run 'stitch configure' first.")?;
    let base = BaseId::new(base).context("Invalid base ID")?;

    let table = args
        .table
        .clone()
        .or(stored.table)
        .context("No table name. Pass --table or run 'stitch configure' first.")?;
    let table = TableName::new(table).context("Invalid table name")?;

    let env_token = std::env::var(TOKEN_ENV)
        .ok()
        .filter(|t| !t.trim().is_empty());

    let (token, token_origin) = match (env_token, stored.token) {
        (Some(t), _) => (Some(ApiToken::new(t)?), TokenOrigin::Environment),
        (None, Some(t)) => (
            Some(ApiToken::new(t).context("Invalid stored token")?),
            TokenOrigin::Stored,
        ),
        (None, None) => (None, TokenOrigin::Missing),
    };

    let table = TableRef::new(service, base, table);
    debug!(%table, service = %table.service, ?token_origin, "Resolved configuration");

    Ok(Settings {
        table,
        token,
        token_origin,
        fields: stored.fields,
    })
}
