//! Application configuration schemas.
//!
//! Configuration is layered with the `config` crate: a base TOML file, an
//! optional environment overlay next to it, then `IFCPIPELINE__*`
//! environment variables. Every field has a default, so an empty setup
//! still yields a usable (if unauthenticated) configuration.

pub mod api;
pub mod logging;
pub mod polling;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use validator::Validate;

pub use self::api::ApiConfig;
pub use self::logging::LoggingConfig;
pub use self::polling::PollingConfig;

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct AppConfig {
    /// Remote service connection settings.
    #[serde(default)]
    #[validate(nested)]
    pub api: ApiConfig,
    /// Job polling defaults.
    #[serde(default)]
    #[validate(nested)]
    pub polling: PollingConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration starting from the given TOML file.
    ///
    /// The file is optional. If `IFCPIPELINE_ENV` is set, `<dir>/<env>.toml`
    /// is merged on top. Environment variables prefixed with `IFCPIPELINE__`
    /// (e.g. `IFCPIPELINE__API__API_KEY`) win over both files.
    pub fn load(path: &str) -> Result<Self, AppError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from(Path::new(path)).required(false));

        if let Some(overlay) = env_overlay_path(path) {
            tracing::debug!("Merging environment overlay '{}'", overlay.display());
            builder = builder.add_source(config::File::from(overlay).required(false));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix("IFCPIPELINE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Override connection settings from command-line flags.
    ///
    /// The result is validated again, so a bad flag is rejected the same
    /// way a bad file value is.
    pub fn apply_overrides(
        &mut self,
        base_url: Option<&str>,
        api_key: Option<&str>,
    ) -> Result<(), AppError> {
        if let Some(url) = base_url {
            self.api.base_url = url.to_string();
        }
        if let Some(key) = api_key {
            self.api.api_key = key.to_string();
        }
        self.validate()?;
        Ok(())
    }

    /// A copy of this configuration with the API key masked, for display.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        copy.api.api_key = self.api.masked_api_key();
        copy
    }
}

fn env_overlay_path(path: &str) -> Option<PathBuf> {
    let env = std::env::var("IFCPIPELINE_ENV").ok()?;
    let dir = Path::new(path).parent().unwrap_or_else(|| Path::new("."));
    Some(dir.join(format!("{env}.toml")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api.base_url, "http://api-gateway");
        assert_eq!(config.polling.interval_seconds, 2);
        assert_eq!(config.polling.timeout_seconds, 300);
        assert!(config.polling.wait_for_completion);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_toml_partial_sections() {
        let toml_str = r#"
[api]
base_url = "https://ifc.example.com/"
api_key = "secret-key-12345"

[polling]
timeout_seconds = 60
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse toml");
        assert_eq!(config.api.base_url, "https://ifc.example.com/");
        assert_eq!(config.polling.timeout_seconds, 60);
        assert_eq!(config.polling.interval_seconds, 2);
        assert_eq!(config.logging.format, "pretty");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_interval_rejected() {
        let mut config = AppConfig::default();
        config.polling.interval_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides_and_redaction() {
        let mut config = AppConfig::default();
        config
            .apply_overrides(Some("http://localhost:8000"), Some("abcdefgh9876"))
            .expect("valid overrides");
        assert_eq!(config.api.base_url, "http://localhost:8000");

        let shown = config.redacted();
        assert_eq!(shown.api.api_key, "****9876");
        assert_eq!(config.api.api_key, "abcdefgh9876");
    }

    #[test]
    fn test_invalid_base_url_override_rejected() {
        let mut config = AppConfig::default();
        let err = config.apply_overrides(Some("notaurl"), None).unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Validation);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = AppConfig::load("does/not/exist.toml").expect("defaults");
        assert_eq!(config.polling.interval_seconds, 2);
    }
}
