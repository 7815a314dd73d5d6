//! Business services containing the flow logic.

pub mod verification;

// Re-export commonly used types
pub use verification::{
    AuthApiTrait, CooldownTimer, FlowConfig, FlowSnapshot, Navigator, OtpFlow,
};
