//! Remote API configuration

use serde::{Deserialize, Serialize};

use super::{env_parse, ConfigError, Environment};

/// Remote API client configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::for_environment(Environment::Development)
    }
}

impl ApiConfig {
    /// Create a configuration pointing at the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Default endpoint for each environment
    pub fn for_environment(environment: Environment) -> Self {
        match environment {
            Environment::Development => Self::new("http://localhost:5000/api"),
            Environment::Staging => Self::new("https://staging.hospitalms.example/api"),
            Environment::Production => Self::new("https://hospitalms.example/api"),
        }
    }

    /// Set the request timeout
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub(crate) fn apply_env(mut self) -> Result<Self, ConfigError> {
        if let Some(base_url) = env_parse::<String>("HM_API_BASE_URL")? {
            self.base_url = base_url;
        }
        if let Some(timeout) = env_parse("HM_API_TIMEOUT_SECS")? {
            self.timeout_secs = timeout;
        }
        Ok(self)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Missing {
                key: "api.base_url".to_string(),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Zero {
                key: "api.timeout_secs".to_string(),
            });
        }
        Ok(())
    }
}

fn default_timeout_secs() -> u64 {
    15
}
