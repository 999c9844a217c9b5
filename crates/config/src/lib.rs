//! Per-account configuration for the upload client.
//!
//! A config value is built once (from disk or the account setup flow) and
//! passed by reference to the components that need it at construction time.
//! There is no process-wide mutable settings object.

use std::path::Path;

use serde::{Deserialize, Serialize};

use cumulus_credentials::Provider;
use cumulus_segment::DEFAULT_SEGMENT_SIZE;

/// Errors from configuration handling.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Settings for one object-storage account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountConfig {
    pub provider: Provider,
    pub endpoint: String,
    pub username: String,
    /// Segment size for large-object uploads, in bytes.
    #[serde(default = "default_segment_size")]
    pub segment_size: u64,
}

fn default_segment_size() -> u64 {
    DEFAULT_SEGMENT_SIZE
}

impl AccountConfig {
    /// Checks the preconditions the upload components rely on, so a bad
    /// config is reported at the configuration edge rather than mid-upload.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoint.is_empty() {
            return Err(ConfigError::Invalid("endpoint must not be empty".into()));
        }
        if self.segment_size == 0 {
            return Err(ConfigError::Invalid(
                "segment size must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Loads and validates a config from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    /// Writes the config as pretty JSON, creating parent directories.
    pub fn to_json_file(&self, path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)?;
        Ok(())
    }
}
