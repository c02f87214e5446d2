//! Error types for stitch.
//!
//! Every failure of a content fetch maps onto one variant here, and every
//! variant collapses into the single error view state of the loader.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The unified error type for stitch operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The request never completed (DNS, TLS, connection, timeout).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The service answered with a non-success HTTP status.
    #[error(transparent)]
    Status(#[from] StatusError),

    /// The service answered successfully but reported an error payload.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// The response body was not the expected JSON document.
    #[error("malformed response: {message}")]
    Decode { message: String },

    /// Configuration or input validation errors.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// Snapshot storage errors for file-backed sources.
    #[error("storage error at {}: {message}", .path.display())]
    Storage { path: PathBuf, message: String },
}

impl Error {
    /// Returns true if the same request might succeed when issued again.
    ///
    /// Nothing in stitch retries on its own; this only informs callers.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Transport(e) => matches!(
                e,
                TransportError::Connection { .. } | TransportError::Timeout { .. }
            ),
            Error::Status(e) => e.status == 429 || e.status >= 500,
            _ => false,
        }
    }

    /// Returns true if the failure points at the access token or permissions.
    pub fn is_auth_error(&self) -> bool {
        match self {
            Error::Status(e) => e.status == 401 || e.status == 403,
            Error::Service(e) => e.is_auth_error(),
            _ => false,
        }
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// A non-success HTTP status returned by the service.
#[derive(Debug)]
pub struct StatusError {
    /// HTTP status code.
    pub status: u16,
    /// Service error type from the body, if present.
    pub kind: Option<String>,
    /// Service error message from the body, if present.
    pub message: Option<String>,
}

impl StatusError {
    /// Create a new status error.
    pub fn new(status: u16, kind: Option<String>, message: Option<String>) -> Self {
        Self {
            status,
            kind,
            message,
        }
    }
}

impl fmt::Display for StatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP error, status code {}", self.status)?;
        if let Some(ref kind) = self.kind {
            write!(f, " [{}]", kind)?;
        }
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for StatusError {}

/// An error reported inside a successful response body.
///
/// Displays as the service's own message text, unchanged.
#[derive(Debug)]
pub struct ServiceError {
    /// Service error type (e.g. `AUTHENTICATION_REQUIRED`), if present.
    pub kind: Option<String>,
    /// Service error message.
    pub message: String,
}

impl ServiceError {
    /// Create a new service error.
    pub fn new(kind: Option<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Check if the service blamed the credentials.
    pub fn is_auth_error(&self) -> bool {
        let code = self.kind.as_deref().unwrap_or(&self.message);
        matches!(
            code,
            "AUTHENTICATION_REQUIRED" | "INVALID_API_KEY" | "INVALID_PERMISSIONS_OR_MODEL_NOT_FOUND"
        )
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ServiceError {}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid service URL.
    #[error("invalid service URL '{value}': {reason}")]
    ServiceUrl { value: String, reason: String },

    /// Missing base identifier.
    #[error("base ID must not be empty")]
    EmptyBaseId,

    /// Missing table name.
    #[error("table name must not be empty")]
    EmptyTableName,

    /// Missing or unusable access token.
    #[error("invalid access token: {reason}")]
    Token { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_mentions_code() {
        let err = Error::from(StatusError::new(404, None, None));
        assert_eq!(err.to_string(), "HTTP error, status code 404");
    }

    #[test]
    fn status_error_appends_body_details() {
        let err = Error::from(StatusError::new(
            401,
            Some("AUTHENTICATION_REQUIRED".to_string()),
            Some("Authentication required".to_string()),
        ));
        assert_eq!(
            err.to_string(),
            "HTTP error, status code 401 [AUTHENTICATION_REQUIRED]: Authentication required"
        );
        assert!(err.is_auth_error());
        assert!(!err.is_retryable());
    }

    #[test]
    fn service_error_is_verbatim() {
        let err = Error::from(ServiceError::new(None, "INVALID_API_KEY"));
        assert_eq!(err.to_string(), "INVALID_API_KEY");
        assert!(err.is_auth_error());
    }

    #[test]
    fn retryable_classification() {
        assert!(Error::from(StatusError::new(503, None, None)).is_retryable());
        assert!(Error::from(StatusError::new(429, None, None)).is_retryable());
        assert!(!Error::from(StatusError::new(404, None, None)).is_retryable());
        assert!(
            Error::from(TransportError::Timeout { duration_ms: 5000 }).is_retryable()
        );
        assert!(
            !Error::Decode {
                message: "expected value".to_string()
            }
            .is_retryable()
        );
    }
}
