//! # Infrastructure Layer
//!
//! Concrete implementations of the collaborators the verification flow in
//! `hm_core` depends on.
//!
//! ## Architecture
//!
//! - **HTTP client**: [`HttpAuthApi`] talks JSON to the portal backend with
//!   `reqwest`
//! - **Mock API**: [`MockAuthApi`] keeps accounts and issued codes in memory
//!   for development and tests

/// Remote authentication API implementations
pub mod auth_api;

pub use auth_api::{HttpAuthApi, MockAuthApi};

// Re-export core error types for convenience
pub use hm_core::errors::{ApiError, GENERIC_ERROR_MESSAGE};
