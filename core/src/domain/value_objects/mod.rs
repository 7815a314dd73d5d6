//! Value objects submitted to the remote API.

pub mod payload;
pub mod purpose;

// Re-export commonly used types
pub use payload::{ActionPayload, RegistrationForm};
pub use purpose::OtpPurpose;
