//! Error types of the verification flow.

mod types;

pub use types::{ApiError, ValidationError, GENERIC_ERROR_MESSAGE};

use thiserror::Error;

use crate::domain::entities::step::FlowStep;

/// Errors returned by flow controller operations
///
/// Every variant is surfaced to the user through [`FlowError::user_message`];
/// none of them ends the flow instance.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Operation belongs to the {expected} step, flow is at {actual}")]
    InvalidStep { expected: FlowStep, actual: FlowStep },

    #[error("Please wait {remaining} seconds before requesting a new code")]
    CooldownActive { remaining: u32 },

    #[error("This flow has already been completed")]
    AlreadyCompleted,
}

impl FlowError {
    /// Text displayed to the user for this error
    pub fn user_message(&self) -> String {
        match self {
            FlowError::Api(err) => err.user_message(),
            other => other.to_string(),
        }
    }
}

pub type FlowResult<T> = Result<T, FlowError>;
