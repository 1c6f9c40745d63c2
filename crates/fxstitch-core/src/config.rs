use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::fixer::FIXER_BASE_URL;
use crate::http_client::DEFAULT_TIMEOUT_MS;

/// Environment variable holding the Fixer credential.
pub const API_KEY_ENV: &str = "FXSTITCH_API_KEY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no API key: pass --api-key, set {API_KEY_ENV}, or provide a config file")]
    MissingApiKey,

    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Client configuration: the single credential plus transport knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_base_url() -> String {
    String::from(FIXER_BASE_URL)
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl Config {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
        }
    }

    /// Read the credential from `FXSTITCH_API_KEY`.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(API_KEY_ENV) {
            Ok(api_key) if !api_key.trim().is_empty() => Ok(Self::new(api_key)),
            _ => Err(ConfigError::MissingApiKey),
        }
    }

    /// Load from a JSON file of the shape `{"api_key": "..."}`.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        if config.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        Ok(config)
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}
