//! Request bodies of the portal auth endpoints

use serde::Serialize;

use hm_core::{ActionPayload, OtpPurpose, RegistrationForm, UserRole};

/// `POST /auth/otp/send`
#[derive(Debug, Serialize)]
pub struct SendOtpRequest<'a> {
    pub email: &'a str,
    pub purpose: OtpPurpose,
}

/// `POST /auth/otp/verify`
#[derive(Debug, Serialize)]
pub struct VerifyOtpRequest<'a> {
    pub email: &'a str,
    pub otp: &'a str,
    pub purpose: OtpPurpose,
}

/// `POST /auth/reset-password`
#[derive(Debug, Serialize)]
pub struct ResetPasswordRequest<'a> {
    pub email: &'a str,
    pub otp: &'a str,
    pub new_password: &'a str,
}

/// `POST /auth/register`
#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub email: &'a str,
    pub otp: &'a str,
    pub name: &'a str,
    pub phone: &'a str,
    pub password: &'a str,
    pub role: UserRole,
}

impl<'a> RegisterRequest<'a> {
    pub fn new(email: &'a str, otp: &'a str, form: &'a RegistrationForm) -> Self {
        Self {
            email,
            otp,
            name: form.full_name.trim(),
            phone: form.phone.trim(),
            password: &form.password,
            role: form.role,
        }
    }
}

/// Body and path of the complete-action request for a payload
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum CompleteActionRequest<'a> {
    ResetPassword(ResetPasswordRequest<'a>),
    Register(RegisterRequest<'a>),
}

impl<'a> CompleteActionRequest<'a> {
    pub fn new(email: &'a str, otp: &'a str, payload: &'a ActionPayload) -> Self {
        match payload {
            ActionPayload::NewPassword { password, .. } => {
                CompleteActionRequest::ResetPassword(ResetPasswordRequest {
                    email,
                    otp,
                    new_password: password,
                })
            }
            ActionPayload::Registration(form) => {
                CompleteActionRequest::Register(RegisterRequest::new(email, otp, form))
            }
        }
    }

    /// Endpoint path relative to the base URL
    pub fn path(&self) -> &'static str {
        match self {
            CompleteActionRequest::ResetPassword(_) => "/auth/reset-password",
            CompleteActionRequest::Register(_) => "/auth/register",
        }
    }
}
