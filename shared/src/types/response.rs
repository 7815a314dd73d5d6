//! Remote API response envelope

use serde::{Deserialize, Serialize};

/// Standard envelope the portal backend wraps every response in
///
/// ```json
/// {
///     "success": true,
///     "message": "Password updated",
///     "data": { "token": "...", "user": { ... } }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful
    #[serde(default)]
    pub success: bool,

    /// Human-readable message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Response data (present on success)
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    /// Error text (some endpoints use this instead of `message`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            error: None,
        }
    }

    /// Create an error response
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
            error: None,
        }
    }

    /// Extract the data, consuming the response
    pub fn into_data(self) -> Option<T> {
        self.data
    }
}

/// Body of a failed request, tolerant of whatever shape the server sends
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    /// Parse a raw response body; anything that is not a JSON object yields an empty body
    pub fn parse(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_default()
    }

    /// The message meant for the user, `message` preferred over `error`
    pub fn server_message(&self) -> Option<String> {
        let present = |field: &Option<String>| {
            field.as_ref().filter(|m| !m.trim().is_empty()).cloned()
        };
        present(&self.message).or_else(|| present(&self.error))
    }
}
