//! Integration tests driving the verification flow through its public API

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;

    use hm_core::{
        ActionPayload, ApiError, AuthApiTrait, AuthSession, CellInput, FlowConfig, FlowStep,
        Navigator, OtpFlow, OtpPurpose, RegistrationForm, Route, UserProfile, UserRole,
    };

    // Server stand-in that issues a new code per send
    #[derive(Default)]
    struct InMemoryServer {
        issued: Mutex<HashMap<String, String>>,
        counter: Mutex<u32>,
    }

    impl InMemoryServer {
        fn code_for(&self, email: &str) -> Option<String> {
            self.issued.lock().unwrap().get(email).cloned()
        }
    }

    #[async_trait]
    impl AuthApiTrait for InMemoryServer {
        async fn send_code(&self, email: &str, _purpose: OtpPurpose) -> Result<(), ApiError> {
            let mut counter = self.counter.lock().unwrap();
            *counter += 1;
            let code = format!("{:06}", 100_000 + *counter * 7_919);
            self.issued.lock().unwrap().insert(email.to_string(), code);
            Ok(())
        }

        async fn verify_code(
            &self,
            email: &str,
            code: &str,
            _purpose: OtpPurpose,
        ) -> Result<(), ApiError> {
            match self.code_for(email) {
                Some(expected) if expected == code => Ok(()),
                _ => Err(ApiError::rejected(400, "Invalid or expired OTP")),
            }
        }

        async fn complete_action(
            &self,
            email: &str,
            _code: &str,
            payload: &ActionPayload,
        ) -> Result<AuthSession, ApiError> {
            let (name, role) = match payload {
                ActionPayload::Registration(form) => (form.full_name.clone(), form.role),
                ActionPayload::NewPassword { .. } => (String::new(), UserRole::Patient),
            };
            Ok(AuthSession {
                token: format!("token-{}", email),
                user: UserProfile {
                    id: "42".to_string(),
                    name,
                    email: email.to_string(),
                    role,
                },
            })
        }
    }

    #[derive(Default)]
    struct Routes(Mutex<Vec<Route>>);

    impl Navigator for Routes {
        fn navigate(&self, route: Route) {
            self.0.lock().unwrap().push(route);
        }
    }

    async fn paste(flow: &mut OtpFlow<InMemoryServer, Routes>, code: &str) {
        let _ = flow
            .handle_input(CellInput::Paste {
                index: 0,
                text: code.to_string(),
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_registration_with_resend() {
        let server = Arc::new(InMemoryServer::default());
        let routes = Arc::new(Routes::default());
        let mut flow = OtpFlow::new(
            server.clone(),
            routes.clone(),
            OtpPurpose::Registration,
            FlowConfig::default(),
        );

        flow.submit_identifier("new.patient@clinic.org").await.unwrap();
        let first_code = server.code_for("new.patient@clinic.org").unwrap();

        tokio::time::sleep(Duration::from_millis(60_500)).await;
        flow.resend_code().await.unwrap();
        let second_code = server.code_for("new.patient@clinic.org").unwrap();
        assert_ne!(first_code, second_code);

        // The superseded code is rejected
        paste(&mut flow, &first_code).await;
        assert_eq!(flow.step(), FlowStep::VerifyCode);
        assert_eq!(flow.error(), Some("Invalid or expired OTP"));

        paste(&mut flow, &second_code).await;
        assert_eq!(flow.step(), FlowStep::CompleteAction);

        let session = flow
            .submit_action(ActionPayload::Registration(RegistrationForm {
                full_name: "New Patient".to_string(),
                phone: "+442071234567".to_string(),
                password: "first-visit-9".to_string(),
                confirm_password: "first-visit-9".to_string(),
                role: UserRole::Patient,
            }))
            .await
            .unwrap();

        assert_eq!(session.user.name, "New Patient");
        assert_eq!(
            *routes.0.lock().unwrap(),
            vec![Route::Dashboard(UserRole::Patient)]
        );
        assert!(flow.snapshot().completed);
    }

    #[tokio::test]
    async fn test_password_reset_by_typing() {
        let server = Arc::new(InMemoryServer::default());
        let routes = Arc::new(Routes::default());
        let mut flow = OtpFlow::new(
            server.clone(),
            routes.clone(),
            OtpPurpose::PasswordReset,
            FlowConfig::default(),
        );

        flow.submit_identifier("doctor@clinic.org").await.unwrap();
        let code = server.code_for("doctor@clinic.org").unwrap();
        for ch in code.chars() {
            let index = flow.digits().focused();
            flow.handle_input(CellInput::Char { index, ch }).await.unwrap();
        }

        flow.submit_action(ActionPayload::new_password("fresh-pass-1", "fresh-pass-1"))
            .await
            .unwrap();

        assert_eq!(*routes.0.lock().unwrap(), vec![Route::SignIn]);
    }
}
