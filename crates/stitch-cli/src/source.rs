//! Content source selection for CLI use.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;

use stitch_core::{ContentSource, Record, TableRef};
use stitch_file::FileSource;
use stitch_http::HttpSource;

use crate::config::{Settings, TOKEN_ENV};

/// Source wrapper for CLI use.
#[derive(Debug)]
pub enum CliSource {
    File(FileSource),
    Http(HttpSource),
}

impl CliSource {
    /// Pick the source matching the configured service URL.
    pub fn open(settings: &Settings, timeout: Option<Duration>) -> Result<Self> {
        let table = settings.table.clone();

        if table.service.is_local() {
            let source = FileSource::new(table).context("Failed to open snapshot directory")?;
            return Ok(CliSource::File(source));
        }

        let token = settings.token.clone().with_context(|| {
            format!(
                "No access token. Set {} or run 'stitch configure --token ...'.",
                TOKEN_ENV
            )
        })?;

        let source = match timeout {
            Some(timeout) => HttpSource::with_timeout(table, token, timeout),
            None => HttpSource::new(table, token),
        }
        .context("Failed to create HTTP source")?;

        Ok(CliSource::Http(source))
    }
}

#[async_trait]
impl ContentSource for CliSource {
    fn table(&self) -> &TableRef {
        match self {
            CliSource::File(source) => source.table(),
            CliSource::Http(source) => source.table(),
        }
    }

    async fn fetch_records(&self) -> stitch_core::Result<Vec<Record>> {
        match self {
            CliSource::File(source) => source.fetch_records().await,
            CliSource::Http(source) => source.fetch_records().await,
        }
    }
}
