//! Wiring of one flow run

use std::io::Write;
use std::sync::Arc;

use tokio::io::AsyncBufRead;

use hm_core::{AuthApiTrait, AuthSession, FlowConfig, OtpFlow, OtpPurpose, Route};

use crate::host::{HostError, TerminalHost, TerminalNavigator};

/// What a finished run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowOutcome {
    /// Session issued by the terminal action, `None` if the user quit
    pub session: Option<AuthSession>,
    /// Where the flow sent the user
    pub route: Option<Route>,
}

/// Run one flow of `purpose` against `api`, reading from `input`
pub async fn run_flow<A, R, W>(
    api: Arc<A>,
    purpose: OtpPurpose,
    config: FlowConfig,
    email: Option<String>,
    input: R,
    output: W,
) -> Result<FlowOutcome, HostError>
where
    A: AuthApiTrait,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let navigator = Arc::new(TerminalNavigator::default());
    let mut flow = OtpFlow::new(api, navigator.clone(), purpose, config);
    let mut host = TerminalHost::new(input, output);

    let session = host.run(&mut flow, email).await?;
    let route = navigator.last_route();

    let mut output = host.into_output();
    if let Some(route) = route {
        writeln!(output, "Redirecting to {}", route)?;
    }
    Ok(FlowOutcome { session, route })
}
