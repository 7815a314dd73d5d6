//! What a verification code is requested for.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Purpose a code is sent and verified for; fixed per flow instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OtpPurpose {
    /// Sign-up of a new account
    Registration,
    /// Password reset of an existing account
    PasswordReset,
}

impl OtpPurpose {
    /// Wire name sent to the remote API
    pub fn as_str(self) -> &'static str {
        match self {
            OtpPurpose::Registration => "registration",
            OtpPurpose::PasswordReset => "password_reset",
        }
    }
}

impl fmt::Display for OtpPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
