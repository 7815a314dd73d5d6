//! HTTP implementation of the portal auth API
//!
//! Every endpoint is a JSON `POST` below the configured base URL. Any 2xx
//! status is success. For other statuses the `message` (or `error`) field of
//! the body becomes the server message shown to the user; a body without one
//! leaves the message empty so the generic fallback is shown instead.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Serialize;
use tracing::{debug, warn};

use hm_core::{ActionPayload, ApiError, AuthApiTrait, AuthSession, OtpPurpose};
use hm_shared::email::mask_email;
use hm_shared::{ApiConfig, ApiResponse, ErrorBody};

use super::dto::{CompleteActionRequest, SendOtpRequest, VerifyOtpRequest};

/// reqwest-backed client for the portal backend
#[derive(Debug, Clone)]
pub struct HttpAuthApi {
    client: Client,
    base_url: String,
}

impl HttpAuthApi {
    /// Build a client with the configured base URL and request timeout
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApiError::Transport {
                message: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST a JSON body and turn non-2xx statuses into [`ApiError::Server`]
    async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        operation: &'static str,
    ) -> Result<Response, ApiError> {
        let url = self.endpoint(path);
        debug!(operation = operation, url = %url, "Sending request");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                warn!(operation = operation, error = %e, event = "api_transport_failed", "Request failed");
                ApiError::Transport {
                    message: format!("{}: {}", operation, e),
                }
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let raw = response.text().await.unwrap_or_default();
        let message = ErrorBody::parse(&raw).server_message();
        warn!(
            operation = operation,
            status = status.as_u16(),
            message = message.as_deref().unwrap_or(""),
            event = "api_request_rejected",
            "Request rejected"
        );
        Err(ApiError::Server {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl AuthApiTrait for HttpAuthApi {
    async fn send_code(&self, email: &str, purpose: OtpPurpose) -> Result<(), ApiError> {
        debug!(email = %mask_email(email), purpose = %purpose, "Requesting OTP email");
        self.post("/auth/otp/send", &SendOtpRequest { email, purpose }, "send_code")
            .await?;
        Ok(())
    }

    async fn verify_code(
        &self,
        email: &str,
        code: &str,
        purpose: OtpPurpose,
    ) -> Result<(), ApiError> {
        let body = VerifyOtpRequest {
            email,
            otp: code,
            purpose,
        };
        self.post("/auth/otp/verify", &body, "verify_code").await?;
        Ok(())
    }

    async fn complete_action(
        &self,
        email: &str,
        code: &str,
        payload: &ActionPayload,
    ) -> Result<AuthSession, ApiError> {
        let request = CompleteActionRequest::new(email, code, payload);
        let response = self
            .post(request.path(), &request, "complete_action")
            .await?;

        let envelope: ApiResponse<AuthSession> =
            response.json().await.map_err(|e| ApiError::Decode {
                message: format!("complete_action: {}", e),
            })?;

        envelope.into_data().ok_or_else(|| ApiError::Decode {
            message: "complete_action: response carries no session".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let api = HttpAuthApi::new(&ApiConfig::new("http://localhost:5000/api/")).unwrap();
        assert_eq!(api.base_url(), "http://localhost:5000/api");
        assert_eq!(
            api.endpoint("/auth/otp/send"),
            "http://localhost:5000/api/auth/otp/send"
        );
    }
}
