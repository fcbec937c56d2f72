//! Remote service credential.

use std::fmt;

use url::Url;

use crate::error::AppError;
use crate::result::AppResult;

/// Base URL and API key for the remote service.
///
/// Owned by the host and never mutated by the client. The `Debug`
/// representation redacts the key.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    base_url: String,
    api_key: String,
}

impl Credential {
    /// Create a credential.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Base URL as configured.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// API key value for the `X-API-Key` header.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Join the base URL and an endpoint path.
    ///
    /// Exactly one `/` separates the two regardless of whether the base URL
    /// ends with one or the path starts with one.
    pub fn endpoint(&self, path: &str) -> AppResult<Url> {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Url::parse(&format!("{base}/{path}")).map_err(|e| {
            AppError::configuration(format!("Invalid endpoint URL for '/{path}': {e}"))
        })
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}
