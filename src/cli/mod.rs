//! CLI module for frest.
//!
//! - Argument parsing
//! - Version display
//! - Session command handlers
//!
//! # Usage
//!
//! ```ignore
//! use frest::cli::{parse_args, run_cli_command};
//!
//! let command = parse_args(std::env::args())?;
//! let output = run_cli_command(command, &config).await?;
//! println!("{}", output);
//! ```

pub mod args;
pub mod commands;
pub mod version;

pub use args::{parse_args, ArgsError, CliCommand, CredentialArgs, USAGE};
pub use commands::{handle_login, handle_logout, handle_signup, handle_status};
pub use version::{version_line, VERSION};

use color_eyre::Result;
use tracing::debug;

use crate::auth::HttpSession;
use crate::config::SessionConfig;

/// Run a parsed command and return the text to print.
///
/// Session commands build an [`HttpSession`] from `config` and restore any
/// stored credential first.
pub async fn run_cli_command(command: CliCommand, config: &SessionConfig) -> Result<String> {
    match command {
        CliCommand::Version => Ok(version_line()),
        CliCommand::Help => Ok(USAGE.to_string()),
        CliCommand::Status => Ok(handle_status(&open_session(config)?)),
        CliCommand::Login(args) => handle_login(&open_session(config)?, args).await,
        CliCommand::Signup(args) => handle_signup(&open_session(config)?, args).await,
        CliCommand::Logout => handle_logout(&open_session(config)?),
    }
}

fn open_session(config: &SessionConfig) -> Result<HttpSession> {
    let session = HttpSession::from_config(config)?;
    if let Err(e) = session.restore() {
        debug!(error = %e, "No stored credential restored");
    }
    Ok(session)
}
