//! Configuration management for feedbackhub.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "feedbackhub";

/// Default feedback table file name.
const FEEDBACK_FILE_NAME: &str = "feedback.csv";

/// Default question answering endpoint.
const DEFAULT_QA_ENDPOINT: &str = "https://api-inference.huggingface.co";

/// Default question answering model.
const DEFAULT_QA_MODEL: &str = "deepset/roberta-base-squad2";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `FEEDBACKHUB_`, with `__`
///    separating sections, e.g. `FEEDBACKHUB_QA__MODEL`)
/// 2. TOML config file at `~/.config/feedbackhub/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// HTTP server configuration.
    pub server: ServerConfig,
    /// Question answering backend configuration.
    pub qa: QaConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the feedback CSV file.
    /// Defaults to `~/.local/share/feedbackhub/feedback.csv`
    pub csv_path: Option<PathBuf>,
}

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the HTTP API binds to.
    pub bind_addr: String,
}

/// Question answering backend configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QaConfig {
    /// Base URL of the inference endpoint.
    pub endpoint: String,
    /// Model identifier to query.
    pub model: String,
    /// Optional bearer token for the inference endpoint.
    pub api_token: Option<String>,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8000".to_string(),
        }
    }
}

impl Default for QaConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_QA_ENDPOINT.to_string(),
            model: DEFAULT_QA_MODEL.to_string(),
            api_token: None,
            timeout_ms: 30_000,
        }
    }
}

impl QaConfig {
    /// The request timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. TOML config file (if exists)
    /// 3. Environment variables (prefixed with `FEEDBACKHUB_`)
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file).nested())
            .merge(Env::prefixed("FEEDBACKHUB_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.server.bind_addr.parse::<SocketAddr>().is_err() {
            return Err(Error::ConfigValidation {
                message: format!(
                    "bind_addr '{}' is not a valid socket address",
                    self.server.bind_addr
                ),
            });
        }

        if self.qa.endpoint.is_empty() {
            return Err(Error::ConfigValidation {
                message: "qa endpoint must not be empty".to_string(),
            });
        }

        if self.qa.model.is_empty() {
            return Err(Error::ConfigValidation {
                message: "qa model must not be empty".to_string(),
            });
        }

        if self.qa.timeout_ms == 0 {
            return Err(Error::ConfigValidation {
                message: "timeout_ms must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    /// Get the feedback CSV path, resolving defaults if not set.
    #[must_use]
    pub fn csv_path(&self) -> PathBuf {
        self.storage
            .csv_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(FEEDBACK_FILE_NAME))
    }

    /// Get the bind address as a parsed socket address.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured address does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.server
            .bind_addr
            .parse()
            .map_err(|_| Error::ConfigValidation {
                message: format!(
                    "bind_addr '{}' is not a valid socket address",
                    self.server.bind_addr
                ),
            })
    }

}
