// shared-types-rs/src/config.rs
// Library-wide configuration loader

use crate::{Charset, ExceptionAction};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

static BASE_CONFIG: OnceCell<Arc<BaseConfig>> = OnceCell::new();

/// Environment variable naming the TOML file read by [`BaseConfig::load`]
pub const CONFIG_PATH_ENV: &str = "CHARCOAL_BASE_CONFIG";

/// Path used when [`CONFIG_PATH_ENV`] is not set
pub const DEFAULT_CONFIG_PATH: &str = "./config/base.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration not initialized")]
    NotInitialized,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct BaseConfig {
    pub logging: LoggingConfig,
    pub sanitizer: SanitizerConfig,
    pub dataset: DatasetConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// trace, debug, info, warn or error
    pub level: String,
    pub json_format: bool,
    pub service_name: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            service_name: "charcoal-base".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SanitizerConfig {
    /// Attach the offending value to sanitizer errors
    pub capture_subject_on_error: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Error action used by batch envelopes built from configuration
    pub default_on_error: ExceptionAction,
    /// Charset used for access key normalization
    pub charset: Charset,
}

impl BaseConfig {
    /// Load configuration from file, once per process.
    ///
    /// A missing file is not an error: defaults are stored instead.
    pub fn load() -> Result<Arc<BaseConfig>, ConfigError> {
        if let Some(config) = BASE_CONFIG.get() {
            return Ok(Arc::clone(config));
        }

        let config_path = env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let path = PathBuf::from(&config_path);

        let config = if path.exists() {
            Self::from_file(&path)?
        } else {
            tracing::debug!(path = %config_path, "config file not found, using defaults");
            BaseConfig::default()
        };

        // A racing initializer may have won; whichever is stored is returned.
        let stored = BASE_CONFIG.get_or_init(|| Arc::new(config));
        Ok(Arc::clone(stored))
    }

    /// Get the global configuration instance
    pub fn get() -> Result<Arc<BaseConfig>, ConfigError> {
        BASE_CONFIG
            .get()
            .map(Arc::clone)
            .ok_or(ConfigError::NotInitialized)
    }

    /// Read and parse a config file without touching the global instance
    pub fn from_file(path: &Path) -> Result<BaseConfig, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<BaseConfig, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}
