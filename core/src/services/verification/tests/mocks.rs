//! Mock implementations for testing the verification flow

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::domain::entities::session::{AuthSession, Route, UserProfile, UserRole};
use crate::domain::value_objects::{ActionPayload, OtpPurpose};
use crate::errors::ApiError;
use crate::services::verification::traits::{AuthApiTrait, Navigator};

pub const ACCEPTED_CODE: &str = "123456";

/// Request seen by the mock API
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    Send {
        email: String,
        purpose: OtpPurpose,
    },
    Verify {
        email: String,
        code: String,
        purpose: OtpPurpose,
    },
    Complete {
        email: String,
        code: String,
        payload: ActionPayload,
    },
}

// Scripted remote API
pub struct MockAuthApi {
    pub calls: Arc<Mutex<Vec<ApiCall>>>,
    pub send_error: Mutex<Option<ApiError>>,
    pub complete_error: Mutex<Option<ApiError>>,
    pub delay: Mutex<Option<Duration>>,
    pub accepted_code: String,
    pub role: UserRole,
}

impl MockAuthApi {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            send_error: Mutex::new(None),
            complete_error: Mutex::new(None),
            delay: Mutex::new(None),
            accepted_code: ACCEPTED_CODE.to_string(),
            role: UserRole::Patient,
        }
    }

    pub fn failing_send(message: &str) -> Self {
        let api = Self::new();
        api.fail_send(Some(ApiError::rejected(404, message)));
        api
    }

    pub fn with_role(mut self, role: UserRole) -> Self {
        self.role = role;
        self
    }

    pub fn fail_send(&self, error: Option<ApiError>) {
        *self.send_error.lock().unwrap() = error;
    }

    pub fn fail_complete(&self, error: Option<ApiError>) {
        *self.complete_error.lock().unwrap() = error;
    }

    /// Make every request take `delay` before answering
    pub fn respond_after(&self, delay: Option<Duration>) {
        *self.delay.lock().unwrap() = delay;
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn send_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, ApiCall::Send { .. }))
            .count()
    }

    pub fn verify_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, ApiCall::Verify { .. }))
            .count()
    }

    async fn record(&self, call: ApiCall) {
        self.calls.lock().unwrap().push(call);
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl AuthApiTrait for MockAuthApi {
    async fn send_code(&self, email: &str, purpose: OtpPurpose) -> Result<(), ApiError> {
        self.record(ApiCall::Send {
            email: email.to_string(),
            purpose,
        })
        .await;
        match self.send_error.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn verify_code(
        &self,
        email: &str,
        code: &str,
        purpose: OtpPurpose,
    ) -> Result<(), ApiError> {
        self.record(ApiCall::Verify {
            email: email.to_string(),
            code: code.to_string(),
            purpose,
        })
        .await;
        if code == self.accepted_code {
            Ok(())
        } else {
            Err(ApiError::rejected(400, "Invalid or expired OTP"))
        }
    }

    async fn complete_action(
        &self,
        email: &str,
        code: &str,
        payload: &ActionPayload,
    ) -> Result<AuthSession, ApiError> {
        self.record(ApiCall::Complete {
            email: email.to_string(),
            code: code.to_string(),
            payload: payload.clone(),
        })
        .await;
        if let Some(err) = self.complete_error.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(AuthSession {
            token: "mock-token".to_string(),
            user: UserProfile {
                id: "user-1".to_string(),
                name: "Amara Okafor".to_string(),
                email: email.to_string(),
                role: self.role,
            },
        })
    }
}

// Navigator that records every route
#[derive(Default)]
pub struct RecordingNavigator {
    pub routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.routes.lock().unwrap().push(route);
    }
}
