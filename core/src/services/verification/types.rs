//! Observable state of a flow instance

use crate::domain::entities::step::FlowStep;
use crate::domain::value_objects::purpose::OtpPurpose;

/// Snapshot published after every observable change
///
/// Hosts render from this and disable their inputs while `loading` is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowSnapshot {
    pub purpose: OtpPurpose,
    pub step: FlowStep,
    /// Email the code was sent to, once known
    pub identifier: Option<String>,
    /// A request is in flight
    pub loading: bool,
    /// Message of the last failure, cleared when a new request starts
    pub error: Option<String>,
    pub cells: Vec<Option<char>>,
    pub focused: usize,
    /// The terminal action ran
    pub completed: bool,
}
