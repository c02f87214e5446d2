//! HTTP client for the list-records endpoint.

use std::time::Duration;

use reqwest::Url;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use tracing::{debug, instrument, trace};

use stitch_core::error::{Error, InvalidInputError, StatusError, TransportError};
use stitch_core::{ApiToken, RecordsPage, Result};

/// HTTP client for table reads.
#[derive(Debug, Clone)]
pub(crate) struct TableClient {
    client: reqwest::Client,
    timeout: Option<Duration>,
}

impl TableClient {
    /// Create a new client. Without a timeout a request may wait forever.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder =
            reqwest::Client::builder().user_agent(concat!("stitch/", env!("CARGO_PKG_VERSION")));

        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| TransportError::Http {
            message: format!("failed to build HTTP client: {}", e),
        })?;

        Ok(Self { client, timeout })
    }

    /// Issue the single GET for a table's records.
    #[instrument(skip(self, token), fields(url = %url))]
    pub async fn get_records(&self, url: Url, token: &ApiToken) -> Result<RecordsPage> {
        debug!("Requesting records");

        let response = self
            .client
            .get(url)
            .headers(Self::auth_headers(token)?)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        self.handle_response(response).await
    }

    /// Create authorization headers for the request.
    fn auth_headers(token: &ApiToken) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        let mut auth_value =
            HeaderValue::from_str(&token.bearer()).map_err(|_| InvalidInputError::Token {
                reason: "token contains characters not allowed in a header".to_string(),
            })?;
        auth_value.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_value);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    /// Handle a response, decoding the body or the error.
    async fn handle_response(&self, response: reqwest::Response) -> Result<RecordsPage> {
        let status = response.status();
        trace!(status = %status, "Table response");

        if status.is_success() {
            let body = response.bytes().await.map_err(|e| self.transport_error(e))?;
            RecordsPage::from_slice(&body)
        } else {
            Err(Self::parse_error_response(response).await.into())
        }
    }

    /// Parse the body of a non-success response, if it has one.
    async fn parse_error_response(response: reqwest::Response) -> StatusError {
        let status = response.status().as_u16();

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(_) => return StatusError::new(status, None, None),
        };

        match RecordsPage::from_slice(&body).ok().and_then(|page| page.error) {
            Some(error) => {
                let (kind, message) = error.into_parts();
                StatusError::new(status, kind, Some(message))
            }
            None => StatusError::new(status, None, None),
        }
    }

    fn transport_error(&self, err: reqwest::Error) -> Error {
        let err = if err.is_timeout() {
            TransportError::Timeout {
                duration_ms: self.timeout.map_or(0, |t| t.as_millis() as u64),
            }
        } else if err.is_connect() {
            TransportError::Connection {
                message: err.to_string(),
            }
        } else {
            TransportError::Http {
                message: err.to_string(),
            }
        };
        err.into()
    }
}
