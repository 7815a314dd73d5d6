//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `api` - Remote API endpoint and HTTP client settings
//! - `environment` - Environment detection and logging configuration
//! - `otp` - Verification code length and resend cooldown

pub mod api;
pub mod environment;
pub mod otp;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use api::ApiConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use otp::OtpConfig;

/// Invalid configuration values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Missing value for {key}")]
    Missing { key: String },

    #[error("{key} must be greater than zero")]
    Zero { key: String },
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    #[serde(default)]
    pub environment: Environment,

    /// Remote API configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Verification code configuration
    #[serde(default)]
    pub otp: OtpConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl AppConfig {
    /// Create configuration with the defaults of the given environment
    pub fn for_environment(environment: Environment) -> Self {
        Self {
            environment,
            api: ApiConfig::for_environment(environment),
            otp: OtpConfig::default(),
            logging: LoggingConfig::for_environment(environment),
        }
    }

    /// Load configuration from environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self::for_environment(Environment::from_env()).apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Override fields with any `HM_*` environment variables that are set
    pub fn apply_env(mut self) -> Result<Self, ConfigError> {
        self.api = self.api.apply_env()?;
        self.otp = self.otp.apply_env()?;
        self.logging = self.logging.apply_env()?;
        Ok(self)
    }

    /// Reject values the flow cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api.validate()?;
        self.otp.validate()
    }
}

/// Read an environment variable and parse it, `Ok(None)` when unset
pub(crate) fn env_parse<T: std::str::FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                value,
            }),
        Err(_) => Ok(None),
    }
}
