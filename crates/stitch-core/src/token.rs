//! Access token for the hosted table service.

use std::fmt;

use crate::error::{Error, InvalidInputError};

/// A bearer token for the hosted table service.
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Treat as opaque; do not parse or inspect
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    /// Create a new access token.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is empty.
    pub fn new(token: impl Into<String>) -> Result<Self, Error> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(InvalidInputError::Token {
                reason: "token must not be empty".to_string(),
            }
            .into());
        }
        Ok(Self(token))
    }

    /// Returns the raw token value.
    ///
    /// # Security
    ///
    /// Use only when building the authorization header or writing the
    /// private configuration file.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Returns the `Authorization` header value for this token.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.expose())
    }
}

// Hide token value in Debug output
impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiToken").field(&"[REDACTED]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_hides_value_in_debug() {
        let token = ApiToken::new("patyF0W1KZWq2vY3Y.81ee26bcf1a4").unwrap();
        let debug = format!("{:?}", token);
        assert!(!debug.contains("paty"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn bearer_header_value() {
        let token = ApiToken::new("pat123").unwrap();
        assert_eq!(token.bearer(), "Bearer pat123");
    }

    #[test]
    fn empty_token_rejected() {
        assert!(ApiToken::new("").is_err());
        assert!(ApiToken::new("   ").is_err());
    }
}
