//! Deployment environment and logging settings

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{env_parse, ConfigError};

/// Variables consulted, in order, to detect the environment
const ENVIRONMENT_KEYS: [&str; 3] = ["ENVIRONMENT", "ENV", "RUST_ENV"];

/// Where the portal runs; selects API endpoint and logging defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    /// Detect from the first environment variable set; unknown values fall
    /// back to development
    pub fn from_env() -> Self {
        ENVIRONMENT_KEYS
            .iter()
            .find_map(|key| std::env::var(key).ok())
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }

    /// Optional TOML file layered over the defaults
    pub fn config_file(&self) -> &'static str {
        match self {
            Environment::Development => "config.development.toml",
            Environment::Staging => "config.staging.toml",
            Environment::Production => "config.production.toml",
        }
    }

    /// Optional dotenv file loaded by the host
    pub fn env_file(&self) -> &'static str {
        match self {
            Environment::Development => ".env.development",
            Environment::Staging => ".env.staging",
            Environment::Production => ".env.production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "staging" | "stage" | "test" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(format!("Invalid environment: {}", s)),
        }
    }
}

/// Subscriber settings applied by the host at startup
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `hm_core=debug,info`
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: LogFormat,

    /// ANSI colors (terminal output only)
    #[serde(default = "default_colored")]
    pub colored: bool,

    /// Include file and line in each event
    #[serde(default)]
    pub source_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl LoggingConfig {
    /// Verbose pretty logs in development, JSON elsewhere
    pub fn for_environment(env: Environment) -> Self {
        let (level, format) = match env {
            Environment::Development => ("debug", LogFormat::Pretty),
            Environment::Staging => ("info", LogFormat::Json),
            Environment::Production => ("warn", LogFormat::Json),
        };
        let interactive = env == Environment::Development;
        Self {
            level: level.to_string(),
            format,
            colored: interactive,
            source_location: interactive,
        }
    }

    pub(crate) fn apply_env(mut self) -> Result<Self, ConfigError> {
        if let Some(level) = env_parse::<String>("HM_LOG_LEVEL")? {
            self.level = level;
        }
        if let Some(format) = env_parse("HM_LOG_FORMAT")? {
            self.format = format;
        }
        Ok(self)
    }
}

/// Log format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            _ => Err(format!("Invalid log format: {}", s)),
        }
    }
}

fn default_log_format() -> LogFormat {
    LogFormat::Pretty
}

fn default_colored() -> bool {
    true
}
