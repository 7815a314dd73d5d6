//! Unit tests for flow steps

use crate::domain::entities::step::FlowStep;

#[test]
fn test_steps_move_forward_only() {
    assert_eq!(FlowStep::CollectIdentifier.next(), Some(FlowStep::VerifyCode));
    assert_eq!(FlowStep::VerifyCode.next(), Some(FlowStep::CompleteAction));
    assert_eq!(FlowStep::CompleteAction.next(), None);
    assert!(FlowStep::CollectIdentifier < FlowStep::VerifyCode);
    assert!(FlowStep::VerifyCode < FlowStep::CompleteAction);
}

#[test]
fn test_step_numbers() {
    assert_eq!(FlowStep::CollectIdentifier.number(), 1);
    assert_eq!(FlowStep::VerifyCode.number(), 2);
    assert_eq!(FlowStep::CompleteAction.number(), 3);
}

#[test]
fn test_serialization() {
    let json = serde_json::to_string(&FlowStep::VerifyCode).unwrap();
    assert_eq!(json, "\"verify_code\"");
}
