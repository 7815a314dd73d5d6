//! In-memory auth API for development and tests
//!
//! Issued codes are written to the log rather than emailed, so a developer
//! can complete a flow without a backend.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use hm_core::{
    ActionPayload, ApiError, AuthApiTrait, AuthSession, OtpPurpose, UserProfile, UserRole,
};
use hm_shared::config::otp::DEFAULT_CODE_LENGTH;
use hm_shared::email::{mask_email, normalize_email};

/// Minutes an issued code stays valid
pub const CODE_TTL_MINUTES: i64 = 10;

/// Account known to the mock backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockAccount {
    pub profile: UserProfile,
    pub password: String,
}

#[derive(Debug, Clone)]
struct IssuedCode {
    code: String,
    expires_at: DateTime<Utc>,
    verified: bool,
}

impl IssuedCode {
    fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

#[derive(Debug, Default)]
struct MockState {
    accounts: HashMap<String, MockAccount>,
    codes: HashMap<(String, OtpPurpose), IssuedCode>,
    sent: usize,
}

/// Auth API keeping accounts and codes in memory
#[derive(Debug, Clone)]
pub struct MockAuthApi {
    state: Arc<RwLock<MockState>>,
    fixed_code: Option<String>,
    code_length: usize,
    code_ttl: Duration,
}

impl Default for MockAuthApi {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAuthApi {
    /// Create an empty mock issuing random six-digit codes
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(MockState::default())),
            fixed_code: None,
            code_length: DEFAULT_CODE_LENGTH,
            code_ttl: Duration::minutes(CODE_TTL_MINUTES),
        }
    }

    /// Always issue `code`
    pub fn with_fixed_code(mut self, code: impl Into<String>) -> Self {
        self.fixed_code = Some(code.into());
        self
    }

    /// Length of generated codes
    pub fn with_code_length(mut self, length: usize) -> Self {
        self.code_length = length.max(1);
        self
    }

    /// How long issued codes stay valid
    pub fn with_code_ttl(mut self, ttl: Duration) -> Self {
        self.code_ttl = ttl;
        self
    }

    /// Register an existing account
    pub async fn with_account(self, name: &str, email: &str, password: &str, role: UserRole) -> Self {
        self.insert_account(name, &normalize_email(email), password, role)
            .await;
        self
    }

    /// Last code issued for an email and purpose
    pub async fn last_code(&self, email: &str, purpose: OtpPurpose) -> Option<String> {
        let state = self.state.read().await;
        state
            .codes
            .get(&(normalize_email(email), purpose))
            .map(|issued| issued.code.clone())
    }

    /// Number of codes sent so far
    pub async fn sent_count(&self) -> usize {
        self.state.read().await.sent
    }

    pub async fn account(&self, email: &str) -> Option<MockAccount> {
        self.state
            .read()
            .await
            .accounts
            .get(&normalize_email(email))
            .cloned()
    }

    async fn insert_account(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: UserRole,
    ) -> MockAccount {
        let account = MockAccount {
            profile: UserProfile {
                id: Uuid::new_v4().to_string(),
                name: name.to_string(),
                email: email.to_string(),
                role,
            },
            password: password.to_string(),
        };
        self.state
            .write()
            .await
            .accounts
            .insert(email.to_string(), account.clone());
        account
    }

    fn generate_code(&self) -> String {
        if let Some(code) = &self.fixed_code {
            return code.clone();
        }
        let mut rng = rand::thread_rng();
        (0..self.code_length)
            .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
            .collect()
    }

    fn session(profile: UserProfile) -> AuthSession {
        AuthSession {
            token: format!("mock-{}", Uuid::new_v4()),
            user: profile,
        }
    }
}

fn rejected(status: u16, message: &str) -> ApiError {
    ApiError::rejected(status, message)
}

#[async_trait]
impl AuthApiTrait for MockAuthApi {
    async fn send_code(&self, email: &str, purpose: OtpPurpose) -> Result<(), ApiError> {
        let email = normalize_email(email);
        let code = self.generate_code();
        let mut state = self.state.write().await;

        let exists = state.accounts.contains_key(&email);
        match purpose {
            OtpPurpose::PasswordReset if !exists => return Err(rejected(404, "Email not found")),
            OtpPurpose::Registration if exists => {
                return Err(rejected(409, "Email already registered"))
            }
            _ => {}
        }

        state.codes.insert(
            (email.clone(), purpose),
            IssuedCode {
                code: code.clone(),
                expires_at: Utc::now() + self.code_ttl,
                verified: false,
            },
        );
        state.sent += 1;

        info!(
            email = %mask_email(&email),
            purpose = %purpose,
            code = %code,
            event = "mock_otp_issued",
            "Mock API issued verification code"
        );
        Ok(())
    }

    async fn verify_code(
        &self,
        email: &str,
        code: &str,
        purpose: OtpPurpose,
    ) -> Result<(), ApiError> {
        let email = normalize_email(email);
        let mut state = self.state.write().await;
        match state.codes.get_mut(&(email.clone(), purpose)) {
            Some(issued) if !issued.is_expired() && issued.code == code => {
                issued.verified = true;
                debug!(email = %mask_email(&email), purpose = %purpose, "Mock API accepted code");
                Ok(())
            }
            _ => Err(rejected(400, "Invalid or expired OTP")),
        }
    }

    async fn complete_action(
        &self,
        email: &str,
        code: &str,
        payload: &ActionPayload,
    ) -> Result<AuthSession, ApiError> {
        let email = normalize_email(email);
        let purpose = payload.purpose();
        let key = (email.clone(), purpose);

        {
            let state = self.state.read().await;
            let valid = state
                .codes
                .get(&key)
                .is_some_and(|issued| issued.verified && !issued.is_expired() && issued.code == code);
            if !valid {
                return Err(rejected(400, "Invalid or expired OTP"));
            }
        }

        let profile = match payload {
            ActionPayload::NewPassword { password, .. } => {
                let mut state = self.state.write().await;
                let account = state
                    .accounts
                    .get_mut(&email)
                    .ok_or_else(|| rejected(404, "Email not found"))?;
                account.password = password.clone();
                account.profile.clone()
            }
            ActionPayload::Registration(form) => {
                if self.state.read().await.accounts.contains_key(&email) {
                    return Err(rejected(409, "Email already registered"));
                }
                self.insert_account(form.full_name.trim(), &email, &form.password, form.role)
                    .await
                    .profile
            }
        };

        self.state.write().await.codes.remove(&key);
        info!(
            email = %mask_email(&email),
            purpose = %purpose,
            role = %profile.role,
            event = "mock_action_completed",
            "Mock API completed action"
        );
        Ok(Self::session(profile))
    }
}
