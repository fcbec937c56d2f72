//! Remote service connection configuration.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::credential::Credential;

/// Connection settings for the IFC Pipeline API gateway.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ApiConfig {
    /// Base URL of the API gateway (with or without trailing slash).
    #[serde(default = "default_base_url")]
    #[validate(url)]
    pub base_url: String,
    /// API key sent as `X-API-Key` on every request.
    #[serde(default)]
    pub api_key: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    #[validate(range(min = 1, max = 3600))]
    pub request_timeout_seconds: u64,
    /// User-Agent header value.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl ApiConfig {
    /// Build the credential used by the request layer.
    pub fn credential(&self) -> Credential {
        Credential::new(&self.base_url, &self.api_key)
    }

    /// API key suitable for display (`****` plus the last four characters).
    pub fn masked_api_key(&self) -> String {
        mask_secret(&self.api_key)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            request_timeout_seconds: default_request_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/// Mask a secret for display.
pub fn mask_secret(secret: &str) -> String {
    if secret.is_empty() {
        return "(not set)".to_string();
    }
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{tail}")
}

fn default_base_url() -> String {
    "http://api-gateway".to_string()
}

fn default_request_timeout() -> u64 {
    300
}

fn default_user_agent() -> String {
    format!("ifcpipeline-client/{}", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret(""), "(not set)");
        assert_eq!(mask_secret("short"), "****");
        assert_eq!(mask_secret("abcdefgh1234"), "****1234");
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let config = ApiConfig {
            base_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
