//! Configuration for the verification flow

use hm_shared::config::OtpConfig;

/// Configuration of one flow instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowConfig {
    /// Number of digit cells
    pub code_length: usize,
    /// Seconds before a code may be resent
    pub resend_cooldown_seconds: u32,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self::from(&OtpConfig::default())
    }
}

impl From<&OtpConfig> for FlowConfig {
    fn from(config: &OtpConfig) -> Self {
        Self {
            code_length: config.code_length,
            resend_cooldown_seconds: config.resend_cooldown_seconds,
        }
    }
}
