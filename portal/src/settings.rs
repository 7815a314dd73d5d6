//! Layered configuration loading
//!
//! Environment defaults, then an optional `config.<environment>.toml`, then
//! `HM_*` environment variables.

use std::path::Path;

use config::{Config, File, FileFormat};
use thiserror::Error;

use hm_shared::{AppConfig, ConfigError, Environment};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read configuration: {0}")]
    Source(#[from] config::ConfigError),

    #[error(transparent)]
    Invalid(#[from] ConfigError),
}

/// Load the configuration of `environment` from the working directory
pub fn load(environment: Environment) -> Result<AppConfig, SettingsError> {
    load_from(environment, Path::new(environment.config_file()))
}

/// Load the configuration of `environment` with an explicit file path
///
/// A missing file is not an error.
pub fn load_from(environment: Environment, path: &Path) -> Result<AppConfig, SettingsError> {
    let defaults = AppConfig::for_environment(environment);
    let settings = Config::builder()
        .add_source(Config::try_from(&defaults)?)
        .add_source(File::from(path).format(FileFormat::Toml).required(false))
        .build()?;

    let config: AppConfig = settings.try_deserialize()?;
    let config = config.apply_env()?;
    config.validate()?;

    tracing::debug!(
        environment = %config.environment,
        file = %path.display(),
        "Configuration loaded"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HM_VARS: [&str; 4] = [
        "HM_API_BASE_URL",
        "HM_API_TIMEOUT_SECS",
        "HM_OTP_CODE_LENGTH",
        "HM_OTP_RESEND_COOLDOWN_SECS",
    ];

    fn unset_all<R>(f: impl FnOnce() -> R) -> R {
        temp_env::with_vars_unset(HM_VARS, f)
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = unset_all(|| {
            load_from(Environment::Staging, &dir.path().join("config.staging.toml"))
        })
        .unwrap();

        assert_eq!(config.environment, Environment::Staging);
        assert_eq!(config.api.base_url, "https://staging.hospitalms.example/api");
        assert_eq!(config.otp.code_length, 6);
        assert_eq!(config.otp.resend_cooldown_seconds, 60);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[api]\nbase_url = \"http://10.0.0.5/api\"\ntimeout_secs = 5\n\n[otp]\nresend_cooldown_seconds = 30"
        )
        .unwrap();

        let config = unset_all(|| load_from(Environment::Development, file.path())).unwrap();

        assert_eq!(config.api.base_url, "http://10.0.0.5/api");
        assert_eq!(config.api.timeout_secs, 5);
        assert_eq!(config.otp.resend_cooldown_seconds, 30);
        assert_eq!(config.otp.code_length, 6);
    }

    #[test]
    fn test_env_overrides_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[otp]\ncode_length = 4").unwrap();

        let config = unset_all(|| {
            temp_env::with_var("HM_OTP_CODE_LENGTH", Some("8"), || {
                load_from(Environment::Development, file.path())
            })
        })
        .unwrap();

        assert_eq!(config.otp.code_length, 8);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[otp]\ncode_length = 0").unwrap();

        let result = unset_all(|| load_from(Environment::Development, file.path()));

        assert!(matches!(result, Err(SettingsError::Invalid(_))));
    }
}
