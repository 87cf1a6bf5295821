//! Centralized dispatcher configuration.
//!
//! Strongly-typed configuration loaded via the `config` crate from
//! environment variables, read once at startup and never re-read per
//! invocation. Required: `BACKEND_BASE_URL`, `API_KEY_SECRET_NAME`,
//! `SECRET_STORE_URL`.

use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use tradebeat_core::Result;

/// Errors from configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// The environment is missing required settings or holds invalid values.
    Load { reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load { reason } => write!(f, "failed to load configuration: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Dispatcher service configuration.
#[derive(Debug, Deserialize)]
pub struct DispatcherConfig {
    /// Base URL of the backend service.
    pub backend_base_url: String,

    /// Name of the secret holding the backend API key.
    pub api_key_secret_name: String,

    /// Private endpoint of the secret store.
    pub secret_store_url: String,

    /// Address the invocation endpoint listens on.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Hard per-request timeout for outbound calls, in seconds.
    /// Must stay well below the invoking scheduler's wall-clock budget.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Header the backend expects the API key under.
    #[serde(default = "default_api_key_header")]
    pub api_key_header: String,

    /// Optional JSON file of trigger definitions for the in-process
    /// firing loop. Without it the service only serves `/invoke`.
    #[serde(default)]
    pub triggers_file: Option<PathBuf>,
}

fn default_listen_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_api_key_header() -> String {
    "api-key".to_string()
}

impl DispatcherConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required configuration is missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| ConfigError::Load {
                reason: e.to_string(),
            })?
            .try_deserialize()
            .map_err(|e| ConfigError::Load {
                reason: e.to_string(),
            })?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn optional_knobs_have_correct_defaults() {
        let config: DispatcherConfig = serde_json::from_value(json!({
            "backend_base_url": "http://10.0.1.20:8000",
            "api_key_secret_name": "trading/api-key",
            "secret_store_url": "http://10.0.2.5/secrets",
        }))
        .expect("deserialize");

        assert_eq!(config.listen_addr, "0.0.0.0:8080");
        assert_eq!(config.request_timeout_secs, 10);
        assert_eq!(config.api_key_header, "api-key");
        assert!(config.triggers_file.is_none());
    }

    #[test]
    fn missing_required_field_is_rejected() {
        let result = serde_json::from_value::<DispatcherConfig>(json!({
            "backend_base_url": "http://10.0.1.20:8000",
        }));
        assert!(result.is_err());
    }
}
