//! # Configuration
//!
//! Sources are merged in this order (later sources override earlier):
//! 1. Default values from `AppConfig::default()`
//! 2. TOML configuration file (if it exists)
//! 3. Environment variables prefixed with `APP_` (e.g. `APP_PORT=8080`)

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

pub const ENV_PREFIX: &str = "APP_";
pub const DEFAULT_CONFIG_FILE: &str = "users.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Deployment environment name, e.g. `development` or `production`.
    pub environment: String,
    pub port: u16,
    /// Capacity of the repository request channel.
    pub repository_buffer: usize,
    /// Used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 3000,
            repository_buffer: 32,
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads from `users.toml` in the working directory, if present.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));
        if path.exists() {
            debug!(path = %path.display(), "Loading configuration file");
            figment = figment.merge(Toml::file(path));
        }
        let config: AppConfig = figment
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()
            .map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::Invalid("Server port cannot be 0".to_string()));
        }
        if self.repository_buffer == 0 {
            return Err(ConfigError::Invalid(
                "Repository buffer must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
