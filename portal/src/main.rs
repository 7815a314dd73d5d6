use std::sync::Arc;

use anyhow::Context;
use tokio::io::BufReader;
use tracing::info;

use hm_core::{FlowConfig, UserRole};
use hm_infra::{HttpAuthApi, MockAuthApi};
use hm_portal::{cli, run_flow, settings, telemetry, Options};
use hm_shared::Environment;

const DEMO_ACCOUNT: &str = "demo.patient@hospitalms.example";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let environment = Environment::from_env();
    dotenvy::from_filename(environment.env_file()).ok();

    let options = Options::from_matches(&cli::new().get_matches());

    let mut config = settings::load(environment).context("loading configuration")?;
    if let Some(api_url) = &options.api_url {
        config.api.base_url = api_url.clone();
    }
    if options.verbose {
        config.logging.level = "debug".to_string();
    }
    telemetry::init(&config.logging)?;

    info!(
        environment = %config.environment,
        purpose = %options.purpose,
        mock = options.mock,
        "Starting hospital portal flow"
    );

    let flow_config = FlowConfig::from(&config.otp);
    let input = BufReader::new(tokio::io::stdin());
    let output = std::io::stdout();

    let outcome = if options.mock {
        let api = MockAuthApi::new()
            .with_code_length(flow_config.code_length)
            .with_account("Demo Patient", DEMO_ACCOUNT, "demo-password", UserRole::Patient)
            .await;
        info!(account = DEMO_ACCOUNT, "Mock API ready; codes are logged");
        run_flow(Arc::new(api), options.purpose, flow_config, options.email, input, output).await?
    } else {
        let api = HttpAuthApi::new(&config.api).context("building HTTP client")?;
        run_flow(Arc::new(api), options.purpose, flow_config, options.email, input, output).await?
    };

    if outcome.session.is_none() {
        info!("Flow cancelled");
    }
    Ok(())
}
