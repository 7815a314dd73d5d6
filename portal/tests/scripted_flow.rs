//! Scripted terminal sessions against the in-memory API

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::io::BufReader;

    use hm_core::{FlowConfig, OtpPurpose, Route, UserRole};
    use hm_infra::MockAuthApi;
    use hm_portal::{run_flow, HostError};

    async fn run_script(
        api: MockAuthApi,
        purpose: OtpPurpose,
        email: Option<&str>,
        script: &str,
    ) -> (Result<hm_portal::FlowOutcome, HostError>, String) {
        let mut output = Vec::new();
        let result = run_flow(
            Arc::new(api),
            purpose,
            FlowConfig::default(),
            email.map(str::to_string),
            BufReader::new(script.as_bytes()),
            &mut output,
        )
        .await;
        (result, String::from_utf8(output).unwrap())
    }

    #[tokio::test]
    async fn test_signup_lands_on_dashboard() {
        let api = MockAuthApi::new().with_fixed_code("246810");
        let script = "246810\nNina Nurse\n+14155550199\nscrubs-on-7\nscrubs-on-7\nnurse\ndoctor\n";

        let (result, output) = run_script(
            api.clone(),
            OtpPurpose::Registration,
            Some("nina@clinic.org"),
            script,
        )
        .await;
        let outcome = result.unwrap();

        assert_eq!(outcome.route, Some(Route::Dashboard(UserRole::Doctor)));
        assert_eq!(outcome.session.unwrap().user.name, "Nina Nurse");
        assert!(output.contains("Unknown role: nurse"));
        assert!(output.contains("Redirecting to /doctor/dashboard"));
        assert!(api.account("nina@clinic.org").await.is_some());
    }

    #[tokio::test]
    async fn test_reset_recovers_from_unknown_email_and_wrong_code() {
        let api = MockAuthApi::new()
            .with_fixed_code("135790")
            .with_account("Ada Admin", "ada@clinic.org", "old-password", UserRole::Admin)
            .await;
        let script = [
            "ghost@clinic.org",
            "ada@clinic.org",
            "000000",
            ":type 0 x",
            "135790",
            "fresh-password",
            "fresh-password",
        ]
        .join("\n");

        let (result, output) = run_script(api.clone(), OtpPurpose::PasswordReset, None, &script).await;
        let outcome = result.unwrap();

        assert_eq!(outcome.route, Some(Route::SignIn));
        assert!(output.contains("! Email not found"));
        assert!(output.contains("! Invalid or expired OTP"));
        assert!(output.contains("Redirecting to /signin"));
        assert_eq!(
            api.account("ada@clinic.org").await.unwrap().password,
            "fresh-password"
        );
    }

    #[tokio::test]
    async fn test_bad_command_is_reported() {
        let api = MockAuthApi::new().with_fixed_code("111111");
        let script = ":jump\n:resend\n:quit\n";

        let (result, output) =
            run_script(api, OtpPurpose::Registration, Some("new@clinic.org"), script).await;
        let outcome = result.unwrap();

        assert_eq!(outcome.session, None);
        assert_eq!(outcome.route, None);
        assert!(output.contains("Unknown command: :jump"));
        assert!(output.contains("! Please wait"));
    }

    #[tokio::test]
    async fn test_closed_input_is_an_error() {
        let (result, _) = run_script(
            MockAuthApi::new(),
            OtpPurpose::Registration,
            None,
            "",
        )
        .await;

        assert!(matches!(result, Err(HostError::InputClosed)));
    }
}
