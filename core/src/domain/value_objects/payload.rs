//! Payloads collected in the last step of a flow.

use serde::{Deserialize, Serialize};

use hm_shared::validation::{
    is_strong_enough_password, is_valid_phone, not_blank, MIN_PASSWORD_LENGTH,
};

use crate::domain::entities::session::UserRole;
use crate::domain::value_objects::purpose::OtpPurpose;
use crate::errors::ValidationError;

/// Fields of the sign-up form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationForm {
    /// Full name shown across the portal
    pub full_name: String,

    /// Contact phone number (E.164)
    pub phone: String,

    /// Chosen password
    pub password: String,

    /// Password typed a second time
    pub confirm_password: String,

    /// Requested role
    pub role: UserRole,
}

/// Flow-specific payload of the CompleteAction step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActionPayload {
    /// New password for a password reset
    NewPassword {
        password: String,
        confirm_password: String,
    },
    /// Registration fields for a sign-up
    Registration(RegistrationForm),
}

impl ActionPayload {
    /// Convenience constructor for a password reset payload
    pub fn new_password(password: impl Into<String>, confirm_password: impl Into<String>) -> Self {
        ActionPayload::NewPassword {
            password: password.into(),
            confirm_password: confirm_password.into(),
        }
    }

    /// The purpose this payload completes
    pub fn purpose(&self) -> OtpPurpose {
        match self {
            ActionPayload::NewPassword { .. } => OtpPurpose::PasswordReset,
            ActionPayload::Registration(_) => OtpPurpose::Registration,
        }
    }

    /// Short name used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            ActionPayload::NewPassword { .. } => "new password",
            ActionPayload::Registration(_) => "registration",
        }
    }

    /// Validate the payload for a flow of the given purpose
    pub fn validate_for(&self, purpose: OtpPurpose) -> Result<(), ValidationError> {
        if self.purpose() != purpose {
            return Err(ValidationError::PayloadMismatch {
                purpose,
                payload: self.kind(),
            });
        }

        match self {
            ActionPayload::NewPassword {
                password,
                confirm_password,
            } => validate_password_pair(password, confirm_password),
            ActionPayload::Registration(form) => {
                if !not_blank(&form.full_name) {
                    return Err(ValidationError::RequiredField {
                        field: "Full name".to_string(),
                    });
                }
                if !is_valid_phone(&form.phone) {
                    return Err(ValidationError::InvalidPhone);
                }
                validate_password_pair(&form.password, &form.confirm_password)
            }
        }
    }
}

fn validate_password_pair(password: &str, confirm_password: &str) -> Result<(), ValidationError> {
    if !is_strong_enough_password(password) {
        return Err(ValidationError::PasswordTooShort {
            min: MIN_PASSWORD_LENGTH,
        });
    }
    if password != confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}
