//! Command-line interface

use clap::{Arg, ArgAction, ArgMatches, Command};

use hm_core::OtpPurpose;

#[must_use]
pub fn new() -> Command {
    Command::new("hm_portal")
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("flow")
                .help("Flow to run")
                .value_parser(["signup", "reset"])
                .required(true),
        )
        .arg(
            Arg::new("mock")
                .long("mock")
                .help("Use the in-memory API; issued codes are written to the log")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("email")
                .short('e')
                .long("email")
                .help("Email address to send the code to, prompted for when omitted"),
        )
        .arg(
            Arg::new("api-url")
                .long("api-url")
                .help("Base URL of the portal API")
                .env("HM_API_BASE_URL"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log at debug level")
                .action(ArgAction::SetTrue),
        )
}

/// Parsed command-line options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub purpose: OtpPurpose,
    pub mock: bool,
    pub email: Option<String>,
    pub api_url: Option<String>,
    pub verbose: bool,
}

impl Options {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        let purpose = match matches.get_one::<String>("flow").map(String::as_str) {
            Some("reset") => OtpPurpose::PasswordReset,
            _ => OtpPurpose::Registration,
        };

        Self {
            purpose,
            mock: matches.get_flag("mock"),
            email: matches.get_one::<String>("email").cloned(),
            api_url: matches.get_one::<String>("api-url").cloned(),
            verbose: matches.get_flag("verbose"),
        }
    }
}
