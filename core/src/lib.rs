//! # Hospital Portal Core
//!
//! Headless OTP verification flow shared by the sign-up and password-reset
//! forms. This crate contains the domain entities (digit entry, countdown,
//! flow step), the value objects submitted to the remote API, the flow
//! controller and its collaborator traits, and the error types.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
