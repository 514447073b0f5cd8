//! Command-line argument parsing for frest.

use thiserror::Error;

/// Email and optional password given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialArgs {
    pub email: String,
    /// Prompted for when absent
    pub password: Option<String>,
}

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Report whether the stored credential is valid
    Status,
    Login(CredentialArgs),
    Signup(CredentialArgs),
    /// Clear storage and session
    Logout,
}

/// Argument parsing failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgsError {
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("unexpected argument: {0}")]
    UnexpectedArgument(String),
    #[error("missing value for {0}")]
    MissingValue(&'static str),
    #[error("--email is required")]
    MissingEmail,
}

/// Usage text printed by `--help`.
pub const USAGE: &str = "\
Usage: frest <command> [options]

Commands:
  status                                    Check the stored credential
  login  --email <email> [--password <pw>]  Log in and store the token
  signup --email <email> [--password <pw>]  Create an account and store the token
  logout                                    Clear stored credentials

Options:
  -h, --help     Show this help
  -V, --version  Show version";

/// Parse command-line arguments.
///
/// The first item is the program name. No command shows help.
///
/// # Examples
///
/// ```
/// use frest::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["frest".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), Ok(CliCommand::Version));
/// ```
pub fn parse_args<I>(args: I) -> Result<CliCommand, ArgsError>
where
    I: Iterator<Item = String>,
{
    let mut args = args.skip(1);
    let Some(first) = args.next() else {
        return Ok(CliCommand::Help);
    };

    match first.as_str() {
        "--version" | "-V" => Ok(CliCommand::Version),
        "--help" | "-h" | "help" => Ok(CliCommand::Help),
        "status" => no_more_args(args, CliCommand::Status),
        "logout" => no_more_args(args, CliCommand::Logout),
        "login" => parse_credentials(args).map(CliCommand::Login),
        "signup" => parse_credentials(args).map(CliCommand::Signup),
        _ => Err(ArgsError::UnknownCommand(first)),
    }
}

fn no_more_args<I>(mut args: I, command: CliCommand) -> Result<CliCommand, ArgsError>
where
    I: Iterator<Item = String>,
{
    match args.next() {
        Some(extra) => Err(ArgsError::UnexpectedArgument(extra)),
        None => Ok(command),
    }
}

fn parse_credentials<I>(mut args: I) -> Result<CredentialArgs, ArgsError>
where
    I: Iterator<Item = String>,
{
    let mut email = None;
    let mut password = None;

    while let Some(arg) = args.next() {
        if let Some(value) = arg.strip_prefix("--email=") {
            email = Some(value.to_string());
        } else if let Some(value) = arg.strip_prefix("--password=") {
            password = Some(value.to_string());
        } else {
            match arg.as_str() {
                "--email" | "-e" => {
                    email = Some(args.next().ok_or(ArgsError::MissingValue("--email"))?)
                }
                "--password" | "-p" => {
                    password = Some(args.next().ok_or(ArgsError::MissingValue("--password"))?)
                }
                _ => return Err(ArgsError::UnexpectedArgument(arg)),
            }
        }
    }

    let email = email
        .filter(|e| !e.trim().is_empty())
        .ok_or(ArgsError::MissingEmail)?;
    Ok(CredentialArgs { email, password })
}
