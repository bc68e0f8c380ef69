//! Configuration management
//!
//! This module handles loading, validation, and merging of the access core's configuration.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{AccessError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Backend connection
    #[serde(default)]
    pub backend: BackendConfig,
    /// Capability table and gate behaviour
    #[serde(default)]
    pub access: AccessConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AccessError::Config(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_yaml_str(&content)?;
        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| AccessError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables (and `.env` if present)
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");
        // A missing .env file is normal outside development
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from a key lookup, starting from defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("LIBRARY_BACKEND_URL") {
            config.backend.base_url = url;
        }
        if let Some(endpoint) = lookup("LIBRARY_ROLES_ENDPOINT") {
            config.backend.roles_endpoint = endpoint;
        }
        if let Some(timeout) = lookup("LIBRARY_TIMEOUT_SECS") {
            config.backend.timeout_secs = timeout.parse().map_err(|e| {
                AccessError::Config(format!("LIBRARY_TIMEOUT_SECS is not a number: {}", e))
            })?;
        }
        config.backend.api_key = lookup("LIBRARY_API_KEY");
        config.backend.api_secret = lookup("LIBRARY_API_SECRET");
        config.backend.session_id = lookup("LIBRARY_SESSION_ID");
        if let Some(level) = lookup("LIBRARY_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.validate()?;
        Ok(config)
    }

    /// Get backend configuration
    pub fn backend(&self) -> &BackendConfig {
        &self.backend
    }

    /// Get access configuration
    pub fn access(&self) -> &AccessConfig {
        &self.access
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.backend
            .validate()
            .map_err(|e| AccessError::Config(format!("Backend config error: {}", e)))?;
        self.access
            .validate()
            .map_err(|e| AccessError::Config(format!("Access config error: {}", e)))?;
        self.logging
            .validate()
            .map_err(|e| AccessError::Config(format!("Logging config error: {}", e)))?;

        Ok(())
    }

    /// Merge with another configuration (other takes precedence)
    pub fn merge(mut self, other: Self) -> Self {
        self.backend = self.backend.merge(other.backend);
        self.access = self.access.merge(other.access);
        self.logging = self.logging.merge(other.logging);
        self
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| AccessError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}
