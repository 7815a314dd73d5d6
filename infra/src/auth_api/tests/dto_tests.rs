//! Wire format of the request bodies

use serde_json::json;

use hm_core::{ActionPayload, OtpPurpose, RegistrationForm, UserRole};

use crate::auth_api::dto::{CompleteActionRequest, SendOtpRequest, VerifyOtpRequest};

#[test]
fn test_send_and_verify_bodies() {
    let send = SendOtpRequest {
        email: "jane@clinic.org",
        purpose: OtpPurpose::PasswordReset,
    };
    assert_eq!(
        serde_json::to_value(&send).unwrap(),
        json!({ "email": "jane@clinic.org", "purpose": "password_reset" })
    );

    let verify = VerifyOtpRequest {
        email: "jane@clinic.org",
        otp: "123456",
        purpose: OtpPurpose::Registration,
    };
    assert_eq!(
        serde_json::to_value(&verify).unwrap(),
        json!({ "email": "jane@clinic.org", "otp": "123456", "purpose": "registration" })
    );
}

#[test]
fn test_reset_password_body() {
    let payload = ActionPayload::new_password("new-secret-1", "new-secret-1");
    let request = CompleteActionRequest::new("jane@clinic.org", "123456", &payload);

    assert_eq!(request.path(), "/auth/reset-password");
    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        json!({ "email": "jane@clinic.org", "otp": "123456", "new_password": "new-secret-1" })
    );
}

#[test]
fn test_register_body() {
    let payload = ActionPayload::Registration(RegistrationForm {
        full_name: " Jane Doe ".to_string(),
        phone: "+14155550123".to_string(),
        password: "ward-rounds-7".to_string(),
        confirm_password: "ward-rounds-7".to_string(),
        role: UserRole::Doctor,
    });
    let request = CompleteActionRequest::new("jane@clinic.org", "123456", &payload);

    assert_eq!(request.path(), "/auth/register");
    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        json!({
            "email": "jane@clinic.org",
            "otp": "123456",
            "name": "Jane Doe",
            "phone": "+14155550123",
            "password": "ward-rounds-7",
            "role": "doctor"
        })
    );
}
