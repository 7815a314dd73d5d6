//! Terminal host for the portal verification flows
//!
//! Wires configuration, logging and a remote API implementation to an
//! [`hm_core::OtpFlow`] and drives it from line-based terminal input.

pub mod app;
pub mod cli;
pub mod host;
pub mod settings;
pub mod telemetry;

pub use app::{run_flow, FlowOutcome};
pub use cli::Options;
pub use host::{parse_code_command, CodeCommand, HostError, TerminalHost, TerminalNavigator};
