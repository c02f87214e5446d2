//! Network-backed content source.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, instrument};

use stitch_core::error::InvalidInputError;
use stitch_core::{ApiToken, ContentSource, Record, Result, TableRef};

use crate::client::TableClient;

/// Reads a table from the hosted service with one GET per fetch.
#[derive(Clone)]
pub struct HttpSource {
    table: TableRef,
    token: ApiToken,
    client: TableClient,
}

impl HttpSource {
    /// Create a source with no request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the table's service is not a network URL.
    pub fn new(table: TableRef, token: ApiToken) -> Result<Self> {
        Self::build(table, token, None)
    }

    /// Create a source whose request gives up after `timeout`.
    pub fn with_timeout(table: TableRef, token: ApiToken, timeout: Duration) -> Result<Self> {
        Self::build(table, token, Some(timeout))
    }

    fn build(table: TableRef, token: ApiToken, timeout: Option<Duration>) -> Result<Self> {
        if !table.service.is_network() {
            return Err(InvalidInputError::ServiceUrl {
                value: table.service.to_string(),
                reason: "HTTP source needs an http(s) URL".to_string(),
            }
            .into());
        }

        Ok(Self {
            table,
            token,
            client: TableClient::new(timeout)?,
        })
    }
}

#[async_trait]
impl ContentSource for HttpSource {
    fn table(&self) -> &TableRef {
        &self.table
    }

    #[instrument(skip(self), fields(table = %self.table))]
    async fn fetch_records(&self) -> Result<Vec<Record>> {
        debug!("Fetching records via HTTP");

        let url = self.table.records_url()?;
        let page = self.client.get_records(url, &self.token).await?;
        page.into_records()
    }
}

impl std::fmt::Debug for HttpSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpSource")
            .field("table", &self.table)
            .field("token", &"[REDACTED]")
            .finish()
    }
}
