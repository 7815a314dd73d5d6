//! Line-based terminal host for a verification flow
//!
//! Each step reads lines from the input. At the code step a line is either
//! a run of digits (pasted into the first cell) or one of the key commands
//! understood by [`parse_code_command`].

use std::io::Write;
use std::sync::Mutex;

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tracing::{debug, info};

use hm_core::domain::entities::countdown::format_remaining;
use hm_core::{
    ActionPayload, AuthApiTrait, AuthSession, CellInput, FlowStep, Navigator, OtpFlow, OtpPurpose,
    RegistrationForm, Route, UserRole,
};
use hm_shared::email::mask_email;

const QUIT: &str = ":quit";

#[derive(Debug, Error)]
pub enum HostError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("{command} expects {expected}")]
    BadArguments {
        command: &'static str,
        expected: &'static str,
    },

    #[error("Input closed before the flow finished")]
    InputClosed,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// One line typed at the code step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeCommand {
    Input(CellInput),
    Resend,
    Verify,
    Restart,
    Quit,
}

/// Parse a line typed at the code step
///
/// Commands without an index act on the focused cell.
pub fn parse_code_command(line: &str, focused: usize) -> Result<CodeCommand, HostError> {
    let line = line.trim();
    if !line.starts_with(':') {
        return Ok(CodeCommand::Input(CellInput::Paste {
            index: 0,
            text: line.to_string(),
        }));
    }

    let mut parts = line.split_whitespace();
    let command = parts.next().unwrap_or_default();
    let args: Vec<&str> = parts.collect();

    let index = |name: &'static str| -> Result<usize, HostError> {
        match args.as_slice() {
            [] => Ok(focused),
            [value] => value.parse().map_err(|_| HostError::BadArguments {
                command: name,
                expected: "a cell index",
            }),
            _ => Err(HostError::BadArguments {
                command: name,
                expected: "at most one cell index",
            }),
        }
    };

    let parsed = match command {
        ":resend" => CodeCommand::Resend,
        ":verify" => CodeCommand::Verify,
        ":restart" => CodeCommand::Restart,
        QUIT => CodeCommand::Quit,
        ":bs" => CodeCommand::Input(CellInput::Backspace {
            index: index(":bs")?,
        }),
        ":left" => CodeCommand::Input(CellInput::ArrowLeft {
            index: index(":left")?,
        }),
        ":right" => CodeCommand::Input(CellInput::ArrowRight {
            index: index(":right")?,
        }),
        ":focus" => CodeCommand::Input(CellInput::Focus {
            index: index(":focus")?,
        }),
        ":type" => {
            let bad = || HostError::BadArguments {
                command: ":type",
                expected: "a cell index and one character",
            };
            let [index, text] = args.as_slice() else {
                return Err(bad());
            };
            let index = index.parse().map_err(|_| bad())?;
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => CodeCommand::Input(CellInput::Char { index, ch }),
                _ => return Err(bad()),
            }
        }
        other => return Err(HostError::UnknownCommand(other.to_string())),
    };
    Ok(parsed)
}

/// Navigator that records routes for the host to report
#[derive(Debug, Default)]
pub struct TerminalNavigator {
    routes: Mutex<Vec<Route>>,
}

impl TerminalNavigator {
    pub fn last_route(&self) -> Option<Route> {
        self.routes.lock().ok().and_then(|routes| routes.last().copied())
    }
}

impl Navigator for TerminalNavigator {
    fn navigate(&self, route: Route) {
        info!(route = %route, event = "navigate", "Leaving verification flow");
        if let Ok(mut routes) = self.routes.lock() {
            routes.push(route);
        }
    }
}

/// Prompts on `out` and reads answers from `input`
pub struct TerminalHost<R, W> {
    lines: Lines<R>,
    out: W,
}

impl<R, W> TerminalHost<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(input: R, out: W) -> Self {
        Self {
            lines: input.lines(),
            out,
        }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Drive the flow until it completes or the user quits
    ///
    /// Returns the issued session, or `None` when the user typed `:quit`.
    pub async fn run<A, N>(
        &mut self,
        flow: &mut OtpFlow<A, N>,
        email: Option<String>,
    ) -> Result<Option<AuthSession>, HostError>
    where
        A: AuthApiTrait,
        N: Navigator,
    {
        let mut email = email;
        writeln!(self.out, "{}", title(flow.purpose()))?;

        loop {
            match flow.step() {
                FlowStep::CollectIdentifier => {
                    let value = match email.take() {
                        Some(value) => value,
                        None => self.prompt("Email").await?,
                    };
                    if value == QUIT {
                        return Ok(None);
                    }
                    if flow.submit_identifier(&value).await.is_ok() {
                        writeln!(self.out, "A verification code was sent to {}", mask_email(&value))?;
                    }
                    self.render(flow)?;
                }
                FlowStep::VerifyCode => {
                    let line = self.prompt("Code").await?;
                    match parse_code_command(&line, flow.digits().focused()) {
                        Ok(CodeCommand::Quit) => return Ok(None),
                        Ok(command) => {
                            if let Err(err) = self.apply(flow, command).await {
                                debug!(error = %err, "Code step operation failed");
                            }
                        }
                        Err(err) => writeln!(self.out, "{}", err)?,
                    }
                    self.render(flow)?;
                }
                FlowStep::CompleteAction => {
                    let Some(payload) = self.read_payload(flow.purpose()).await? else {
                        return Ok(None);
                    };
                    match flow.submit_action(payload).await {
                        Ok(session) => {
                            writeln!(self.out, "Done: {} ({})", session.user.name, session.user.email)?;
                            return Ok(Some(session));
                        }
                        Err(_) => self.render(flow)?,
                    }
                }
            }
        }
    }

    async fn apply<A, N>(
        &mut self,
        flow: &mut OtpFlow<A, N>,
        command: CodeCommand,
    ) -> hm_core::FlowResult<()>
    where
        A: AuthApiTrait,
        N: Navigator,
    {
        match command {
            CodeCommand::Input(input) => flow.handle_input(input).await,
            CodeCommand::Resend => flow.resend_code().await,
            CodeCommand::Verify => flow.verify_code().await,
            CodeCommand::Restart => {
                flow.restart();
                Ok(())
            }
            CodeCommand::Quit => Ok(()),
        }
    }

    async fn read_payload(
        &mut self,
        purpose: OtpPurpose,
    ) -> Result<Option<ActionPayload>, HostError> {
        let mut answers = Vec::new();
        let labels: &[&str] = match purpose {
            OtpPurpose::PasswordReset => &["New password", "Confirm password"],
            OtpPurpose::Registration => &[
                "Full name",
                "Phone (+country code)",
                "Password",
                "Confirm password",
            ],
        };
        for label in labels {
            let answer = self.prompt(label).await?;
            if answer == QUIT {
                return Ok(None);
            }
            answers.push(answer);
        }

        let payload = match purpose {
            OtpPurpose::PasswordReset => {
                let [password, confirm_password] = take::<2>(answers);
                ActionPayload::NewPassword {
                    password,
                    confirm_password,
                }
            }
            OtpPurpose::Registration => {
                let Some(role) = self.read_role().await? else {
                    return Ok(None);
                };
                let [full_name, phone, password, confirm_password] = take::<4>(answers);
                ActionPayload::Registration(RegistrationForm {
                    full_name,
                    phone,
                    password,
                    confirm_password,
                    role,
                })
            }
        };
        Ok(Some(payload))
    }

    async fn read_role(&mut self) -> Result<Option<UserRole>, HostError> {
        loop {
            let answer = self.prompt("Role (admin/doctor/patient)").await?;
            if answer == QUIT {
                return Ok(None);
            }
            match answer.parse() {
                Ok(role) => return Ok(Some(role)),
                Err(err) => writeln!(self.out, "{}", err)?,
            }
        }
    }

    async fn prompt(&mut self, label: &str) -> Result<String, HostError> {
        write!(self.out, "{}: ", label)?;
        self.out.flush()?;
        match self.lines.next_line().await? {
            Some(line) => Ok(line.trim().to_string()),
            None => Err(HostError::InputClosed),
        }
    }

    fn render<A, N>(&mut self, flow: &OtpFlow<A, N>) -> Result<(), HostError>
    where
        A: AuthApiTrait,
        N: Navigator,
    {
        let snapshot = flow.snapshot();
        writeln!(
            self.out,
            "-- step {}/3: {}",
            snapshot.step.number(),
            snapshot.step
        )?;

        if snapshot.step == FlowStep::VerifyCode {
            let cells: Vec<String> = snapshot
                .cells
                .iter()
                .enumerate()
                .map(|(index, cell)| {
                    let value = cell.unwrap_or('_');
                    if index == snapshot.focused {
                        format!("[{}]", value)
                    } else {
                        format!(" {} ", value)
                    }
                })
                .collect();
            writeln!(self.out, "{}", cells.concat())?;

            match flow.cooldown_remaining() {
                0 => writeln!(self.out, "Didn't get a code? Type :resend")?,
                seconds => writeln!(self.out, "Resend code in {}", format_remaining(seconds))?,
            }
        }

        if let Some(error) = &snapshot.error {
            writeln!(self.out, "! {}", error)?;
        }
        Ok(())
    }
}

fn title(purpose: OtpPurpose) -> &'static str {
    match purpose {
        OtpPurpose::Registration => "Create your account",
        OtpPurpose::PasswordReset => "Reset your password",
    }
}

/// Move the first `N` answers into an array, padding with empty strings
fn take<const N: usize>(answers: Vec<String>) -> [String; N] {
    let mut answers = answers.into_iter();
    std::array::from_fn(|_| answers.next().unwrap_or_default())
}
