//! Domain entities owned by one flow instance.

pub mod countdown;
pub mod digit_entry;
pub mod session;
pub mod step;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use countdown::Countdown;
pub use digit_entry::{CellInput, DigitEntry, FocusHandle, HeadlessHandle};
pub use session::{AuthSession, Route, UserProfile, UserRole};
pub use step::FlowStep;
