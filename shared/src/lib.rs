//! Shared utilities and common types for the hospital portal
//!
//! This crate provides common functionality used across all portal modules:
//! - Configuration types
//! - Remote API envelope types
//! - Utility functions (email and password validation, masking)

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    ApiConfig, AppConfig, ConfigError, Environment, LogFormat, LoggingConfig, OtpConfig,
};
pub use types::{ApiResponse, ErrorBody};
pub use utils::{email, validation};
