//! Verification code configuration

use serde::{Deserialize, Serialize};

use super::{env_parse, ConfigError};

/// Number of digit cells in a verification code
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Seconds a user waits before another code may be requested
pub const DEFAULT_RESEND_COOLDOWN_SECONDS: u32 = 60;

/// Verification code entry configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Number of digit cells
    #[serde(default = "default_code_length")]
    pub code_length: usize,

    /// Resend cooldown in seconds
    #[serde(default = "default_resend_cooldown")]
    pub resend_cooldown_seconds: u32,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            code_length: DEFAULT_CODE_LENGTH,
            resend_cooldown_seconds: DEFAULT_RESEND_COOLDOWN_SECONDS,
        }
    }
}

impl OtpConfig {
    pub(crate) fn apply_env(mut self) -> Result<Self, ConfigError> {
        if let Some(length) = env_parse("HM_OTP_CODE_LENGTH")? {
            self.code_length = length;
        }
        if let Some(cooldown) = env_parse("HM_OTP_RESEND_COOLDOWN_SECS")? {
            self.resend_cooldown_seconds = cooldown;
        }
        Ok(self)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.code_length == 0 {
            return Err(ConfigError::Zero {
                key: "otp.code_length".to_string(),
            });
        }
        Ok(())
    }
}

fn default_code_length() -> usize {
    DEFAULT_CODE_LENGTH
}

fn default_resend_cooldown() -> u32 {
    DEFAULT_RESEND_COOLDOWN_SECONDS
}
