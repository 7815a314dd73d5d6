//! Traits for the remote API and navigation collaborators

use async_trait::async_trait;

use crate::domain::entities::session::{AuthSession, Route};
use crate::domain::value_objects::{ActionPayload, OtpPurpose};
use crate::errors::ApiError;

/// Remote authentication API used by the flow
#[async_trait]
pub trait AuthApiTrait: Send + Sync {
    /// Ask the server to email a verification code
    async fn send_code(&self, email: &str, purpose: OtpPurpose) -> Result<(), ApiError>;

    /// Check a code the user entered
    async fn verify_code(
        &self,
        email: &str,
        code: &str,
        purpose: OtpPurpose,
    ) -> Result<(), ApiError>;

    /// Submit the flow-specific payload together with the verified code
    async fn complete_action(
        &self,
        email: &str,
        code: &str,
        payload: &ActionPayload,
    ) -> Result<AuthSession, ApiError>;
}

/// Moves the host away from the form once a flow completes
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}
