//! Errors of the remote API collaborator and of local form validation

use thiserror::Error;

use crate::domain::value_objects::purpose::OtpPurpose;

/// Shown when a failure carries no server-provided message
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// Failure of a remote API call
///
/// Server messages are opaque strings shown to the user verbatim; no error
/// codes are interpreted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Request rejected with status {status}: {}", message.as_deref().unwrap_or("no message"))]
    Server { status: u16, message: Option<String> },

    #[error("Transport failure: {message}")]
    Transport { message: String },

    #[error("Malformed response: {message}")]
    Decode { message: String },
}

impl ApiError {
    /// A rejection carrying a server message
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        ApiError::Server {
            status,
            message: Some(message.into()),
        }
    }

    /// The server message if there is one
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Server { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Server message when present, otherwise the generic fallback
    pub fn user_message(&self) -> String {
        self.server_message()
            .unwrap_or(GENERIC_ERROR_MESSAGE)
            .to_string()
    }
}

/// Local validation failures, detected before any request is made
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Please enter a valid phone number")]
    InvalidPhone,

    #[error("{field} is required")]
    RequiredField { field: String },

    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Please enter all {expected} digits of the code")]
    IncompleteCode { expected: usize },

    #[error("A {payload} payload cannot complete a {purpose} flow")]
    PayloadMismatch {
        purpose: OtpPurpose,
        payload: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_server_message() {
        let err = ApiError::rejected(404, "Email not found");
        assert_eq!(err.user_message(), "Email not found");
    }

    #[test]
    fn test_user_message_falls_back() {
        let silent = ApiError::Server {
            status: 500,
            message: None,
        };
        assert_eq!(silent.user_message(), GENERIC_ERROR_MESSAGE);

        let transport = ApiError::Transport {
            message: "connection refused".to_string(),
        };
        assert_eq!(transport.user_message(), GENERIC_ERROR_MESSAGE);
    }
}
