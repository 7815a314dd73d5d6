//! Steps of the verification wizard.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stage of one flow instance, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowStep {
    /// Capture the email address the code is sent to
    CollectIdentifier,
    /// Enter the code received by email
    VerifyCode,
    /// Submit the new password or the registration fields
    CompleteAction,
}

impl FlowStep {
    /// The step a success moves to; the last step has none
    pub fn next(self) -> Option<Self> {
        match self {
            FlowStep::CollectIdentifier => Some(FlowStep::VerifyCode),
            FlowStep::VerifyCode => Some(FlowStep::CompleteAction),
            FlowStep::CompleteAction => None,
        }
    }

    /// 1-based position shown as "Step n of 3"
    pub fn number(self) -> u8 {
        match self {
            FlowStep::CollectIdentifier => 1,
            FlowStep::VerifyCode => 2,
            FlowStep::CompleteAction => 3,
        }
    }
}

impl fmt::Display for FlowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FlowStep::CollectIdentifier => "collect identifier",
            FlowStep::VerifyCode => "verify code",
            FlowStep::CompleteAction => "complete action",
        };
        f.write_str(name)
    }
}
