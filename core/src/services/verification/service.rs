//! Verification flow controller

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;

use hm_shared::email::{is_valid_email, mask_email, normalize_email};

use crate::domain::entities::digit_entry::{CellInput, DigitEntry};
use crate::domain::entities::session::{AuthSession, Route};
use crate::domain::entities::step::FlowStep;
use crate::domain::value_objects::{ActionPayload, OtpPurpose};
use crate::errors::{ApiError, FlowError, FlowResult, ValidationError};

use super::config::FlowConfig;
use super::timer::CooldownTimer;
use super::traits::{AuthApiTrait, Navigator};
use super::types::FlowSnapshot;

/// Current step together with what earlier steps established
#[derive(Debug, Clone, PartialEq, Eq)]
enum Stage {
    CollectIdentifier,
    VerifyCode { email: String },
    CompleteAction { email: String, code: String },
}

impl Stage {
    fn step(&self) -> FlowStep {
        match self {
            Stage::CollectIdentifier => FlowStep::CollectIdentifier,
            Stage::VerifyCode { .. } => FlowStep::VerifyCode,
            Stage::CompleteAction { .. } => FlowStep::CompleteAction,
        }
    }

    fn email(&self) -> Option<&str> {
        match self {
            Stage::CollectIdentifier => None,
            Stage::VerifyCode { email } | Stage::CompleteAction { email, .. } => Some(email),
        }
    }
}

/// One instance of the email → code → action wizard
///
/// Owns its code cells, step and cooldown timer. Operations take `&mut self`,
/// so an instance never has more than one request in flight; the loading
/// flag published in [`FlowSnapshot`] lets a host disable resubmission while
/// a request runs. Failures leave the step unchanged and are surfaced as the
/// snapshot's error message.
pub struct OtpFlow<A: AuthApiTrait, N: Navigator> {
    api: Arc<A>,
    navigator: Arc<N>,
    purpose: OtpPurpose,
    stage: Stage,
    digits: DigitEntry,
    cooldown: CooldownTimer,
    loading: bool,
    error: Option<String>,
    completed: bool,
    snapshot: watch::Sender<FlowSnapshot>,
}

impl<A: AuthApiTrait, N: Navigator> OtpFlow<A, N> {
    /// Create a flow at its first step
    ///
    /// # Arguments
    ///
    /// * `api` - Remote API the flow sends, verifies and completes through
    /// * `navigator` - Receives the terminal route
    /// * `purpose` - Sign-up or password reset
    /// * `config` - Code length and resend cooldown
    pub fn new(api: Arc<A>, navigator: Arc<N>, purpose: OtpPurpose, config: FlowConfig) -> Self {
        let digits = DigitEntry::new(config.code_length);
        let snapshot = FlowSnapshot {
            purpose,
            step: FlowStep::CollectIdentifier,
            identifier: None,
            loading: false,
            error: None,
            cells: digits.cells().to_vec(),
            focused: digits.focused(),
            completed: false,
        };
        let (snapshot, _) = watch::channel(snapshot);

        Self {
            api,
            navigator,
            purpose,
            stage: Stage::CollectIdentifier,
            digits,
            cooldown: CooldownTimer::new(config.resend_cooldown_seconds),
            loading: false,
            error: None,
            completed: false,
            snapshot,
        }
    }

    pub fn purpose(&self) -> OtpPurpose {
        self.purpose
    }

    pub fn step(&self) -> FlowStep {
        self.stage.step()
    }

    /// Email the code was sent to, once the first step succeeded
    pub fn identifier(&self) -> Option<&str> {
        self.stage.email()
    }

    /// Message of the last failure
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn digits(&self) -> &DigitEntry {
        &self.digits
    }

    /// Register a callback fired with the code whenever entry completes it
    pub fn on_code_complete<F>(&mut self, callback: F)
    where
        F: FnMut(&str) + Send + 'static,
    {
        self.digits.on_complete(callback);
    }

    /// Seconds before a resend is allowed
    pub fn cooldown_remaining(&self) -> u32 {
        self.cooldown.remaining()
    }

    /// Whether the resend action should be offered
    pub fn can_resend(&self) -> bool {
        self.step() == FlowStep::VerifyCode && self.cooldown.remaining() == 0
    }

    /// Receive every cooldown tick
    pub fn subscribe_cooldown(&self) -> watch::Receiver<u32> {
        self.cooldown.subscribe()
    }

    /// Receive every published snapshot
    pub fn subscribe(&self) -> watch::Receiver<FlowSnapshot> {
        self.snapshot.subscribe()
    }

    /// Current observable state
    pub fn snapshot(&self) -> FlowSnapshot {
        FlowSnapshot {
            purpose: self.purpose,
            step: self.step(),
            identifier: self.identifier().map(str::to_string),
            loading: self.loading,
            error: self.error.clone(),
            cells: self.digits.cells().to_vec(),
            focused: self.digits.focused(),
            completed: self.completed,
        }
    }

    /// Submit the email address and request a code for it
    ///
    /// On success the flow moves to VerifyCode with empty cells and a fresh
    /// cooldown. On failure the step stays at CollectIdentifier.
    pub async fn submit_identifier(&mut self, email: &str) -> FlowResult<()> {
        self.ensure_step(FlowStep::CollectIdentifier)?;
        if !is_valid_email(email) {
            return self.fail(ValidationError::InvalidEmail.into());
        }
        let email = normalize_email(email);

        tracing::info!(
            email = %mask_email(&email),
            purpose = %self.purpose,
            event = "otp_send_requested",
            "Requesting verification code"
        );

        let api = Arc::clone(&self.api);
        let purpose = self.purpose;
        let result = self.request(api.send_code(&email, purpose)).await;

        match result {
            Ok(()) => {
                self.stage = Stage::VerifyCode { email };
                self.on_code_sent();
                Ok(())
            }
            Err(err) => self.fail_api("otp_send_failed", err),
        }
    }

    /// Request a new code for the same email
    ///
    /// Only available at VerifyCode once the cooldown reached zero.
    pub async fn resend_code(&mut self) -> FlowResult<()> {
        self.ensure_step(FlowStep::VerifyCode)?;
        let remaining = self.cooldown.remaining();
        if remaining > 0 {
            return self.fail(FlowError::CooldownActive { remaining });
        }
        let email = self.current_email()?;

        tracing::info!(
            email = %mask_email(&email),
            purpose = %self.purpose,
            event = "otp_resend_requested",
            "Requesting a new verification code"
        );

        let api = Arc::clone(&self.api);
        let purpose = self.purpose;
        let result = self.request(api.send_code(&email, purpose)).await;

        match result {
            Ok(()) => {
                self.on_code_sent();
                Ok(())
            }
            Err(err) => self.fail_api("otp_resend_failed", err),
        }
    }

    /// Route a key or clipboard event to the code cells
    ///
    /// When the event completes the code, verification runs before this
    /// returns.
    pub async fn handle_input(&mut self, input: CellInput) -> FlowResult<()> {
        self.ensure_step(FlowStep::VerifyCode)?;
        let completed = self.digits.apply(input);
        self.publish();
        match completed {
            Some(code) => self.verify(code).await,
            None => Ok(()),
        }
    }

    /// Verify the code currently in the cells
    pub async fn verify_code(&mut self) -> FlowResult<()> {
        self.ensure_step(FlowStep::VerifyCode)?;
        if !self.digits.is_complete() {
            return self.fail(
                ValidationError::IncompleteCode {
                    expected: self.digits.code_length(),
                }
                .into(),
            );
        }
        let code = self.digits.code();
        self.verify(code).await
    }

    /// Submit the flow-specific payload
    ///
    /// On success the terminal route is handed to the navigator and the
    /// issued session is returned; the flow is then completed and accepts no
    /// further submissions.
    pub async fn submit_action(&mut self, payload: ActionPayload) -> FlowResult<AuthSession> {
        if self.completed {
            return Err(FlowError::AlreadyCompleted);
        }
        let (email, code) = match &self.stage {
            Stage::CompleteAction { email, code } => (email.clone(), code.clone()),
            _ => return Err(self.invalid_step(FlowStep::CompleteAction)),
        };
        if let Err(err) = payload.validate_for(self.purpose) {
            return self.fail(err.into());
        }

        let api = Arc::clone(&self.api);
        let result = self.request(api.complete_action(&email, &code, &payload)).await;

        match result {
            Ok(session) => {
                self.completed = true;
                self.cooldown.stop();
                let route = self.terminal_route(&session);
                tracing::info!(
                    email = %mask_email(&email),
                    purpose = %self.purpose,
                    route = %route,
                    event = "flow_completed",
                    "Verification flow completed"
                );
                self.publish();
                self.navigator.navigate(route);
                Ok(session)
            }
            Err(err) => self.fail_api("flow_action_failed", err),
        }
    }

    /// Start over from the first step
    pub fn restart(&mut self) {
        tracing::debug!(purpose = %self.purpose, event = "flow_restarted", "Restarting verification flow");
        self.stage = Stage::CollectIdentifier;
        self.digits.clear();
        self.cooldown.stop();
        self.loading = false;
        self.error = None;
        self.completed = false;
        self.publish();
    }

    async fn verify(&mut self, code: String) -> FlowResult<()> {
        let email = self.current_email()?;

        let api = Arc::clone(&self.api);
        let purpose = self.purpose;
        let result = self.request(api.verify_code(&email, &code, purpose)).await;

        match result {
            Ok(()) => {
                tracing::info!(
                    email = %mask_email(&email),
                    purpose = %self.purpose,
                    event = "otp_verified_success",
                    "Verification code accepted"
                );
                self.stage = Stage::CompleteAction { email, code };
                self.publish();
                Ok(())
            }
            Err(err) => self.fail_api("otp_verification_failed", err),
        }
    }

    fn terminal_route(&self, session: &AuthSession) -> Route {
        match self.purpose {
            OtpPurpose::PasswordReset => Route::SignIn,
            OtpPurpose::Registration => Route::Dashboard(session.user.role),
        }
    }

    fn on_code_sent(&mut self) {
        self.digits.clear();
        self.cooldown.restart();
        self.publish();
    }

    fn current_email(&self) -> FlowResult<String> {
        match &self.stage {
            Stage::VerifyCode { email } => Ok(email.clone()),
            _ => Err(self.invalid_step(FlowStep::VerifyCode)),
        }
    }

    fn ensure_step(&self, expected: FlowStep) -> FlowResult<()> {
        if self.step() == expected {
            Ok(())
        } else {
            Err(self.invalid_step(expected))
        }
    }

    fn invalid_step(&self, expected: FlowStep) -> FlowError {
        FlowError::InvalidStep {
            expected,
            actual: self.step(),
        }
    }

    /// Await a remote call with the loading flag set
    ///
    /// The flag is cleared even when the returned future is dropped before
    /// the call finishes.
    async fn request<T>(
        &mut self,
        call: impl Future<Output = Result<T, ApiError>>,
    ) -> Result<T, ApiError> {
        let _in_flight = InFlight::begin(self);
        call.await
    }

    fn fail_api<T>(&mut self, event: &'static str, err: ApiError) -> FlowResult<T> {
        tracing::warn!(
            purpose = %self.purpose,
            step = %self.step(),
            error = %err,
            event = event,
            "Remote API request failed"
        );
        self.fail(err.into())
    }

    fn fail<T>(&mut self, err: FlowError) -> FlowResult<T> {
        self.error = Some(err.user_message());
        self.publish();
        Err(err)
    }

    fn publish(&self) {
        self.snapshot.send_replace(self.snapshot());
    }
}

/// Marks a flow as loading for as long as it lives
struct InFlight<'a, A: AuthApiTrait, N: Navigator> {
    flow: &'a mut OtpFlow<A, N>,
}

impl<'a, A: AuthApiTrait, N: Navigator> InFlight<'a, A, N> {
    fn begin(flow: &'a mut OtpFlow<A, N>) -> Self {
        flow.loading = true;
        flow.error = None;
        flow.publish();
        Self { flow }
    }
}

impl<A: AuthApiTrait, N: Navigator> Drop for InFlight<'_, A, N> {
    fn drop(&mut self) {
        self.flow.loading = false;
        self.flow.publish();
    }
}
