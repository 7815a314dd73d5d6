//! OTP verification flow module
//!
//! This module provides the verification wizard shared by sign-up and
//! password reset:
//! - Email submission and code sending
//! - Code entry and verification
//! - Resend cooldown
//! - Completion of the flow-specific action and navigation away

mod config;
mod service;
mod timer;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::FlowConfig;
pub use service::OtpFlow;
pub use timer::CooldownTimer;
pub use traits::{AuthApiTrait, Navigator};
pub use types::FlowSnapshot;
