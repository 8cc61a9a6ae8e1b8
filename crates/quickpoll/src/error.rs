//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use quickpoll_config::ConfigError;
use quickpoll_core::CoreError;

/// Exit codes, stable for scripting.
#[allow(dead_code)]
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration problem: {message}")]
    #[diagnostic(
        code(quickpoll::config),
        help(
            "Set QUICKPOLL_SERVICE, add `service` to quickpoll.toml, \
             or pass --service with the poll service base URL."
        )
    )]
    Config { message: String },

    // ── Input ────────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(quickpoll::validation))]
    Validation { message: String },

    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the poll service")]
    #[diagnostic(
        code(quickpoll::connection),
        help("Check that the service is running and the URL is correct: {reason}")
    )]
    Connection { reason: String },

    #[error("The poll service did not answer in time")]
    #[diagnostic(
        code(quickpoll::timeout),
        help("Try again, or raise --timeout if the service is just slow.")
    )]
    Timeout,

    // ── Service outcomes ─────────────────────────────────────────────
    #[error("Not found: {what}")]
    #[diagnostic(
        code(quickpoll::not_found),
        help("Check the poll code -- closed polls disappear from the join endpoint.")
    )]
    NotFound { what: String },

    #[error("You have already voted in this poll")]
    #[diagnostic(
        code(quickpoll::already_voted),
        help("Each participant gets exactly one vote per poll.")
    )]
    AlreadyVoted,

    #[error("The service rejected the vote: {reason}")]
    #[diagnostic(code(quickpoll::vote_rejected))]
    VoteRejected { reason: String },

    #[error("The service rejected the request: {message}")]
    #[diagnostic(code(quickpoll::api))]
    Api { message: String },

    // ── Internal ─────────────────────────────────────────────────────
    #[error("Internal error: {0}")]
    #[diagnostic(code(quickpoll::internal))]
    Internal(String),
}

impl CliError {
    /// The process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config { .. } | Self::Validation { .. } => exit_code::USAGE,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::AlreadyVoted => exit_code::CONFLICT,
            Self::Connection { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::VoteRejected { .. } | Self::Api { .. } | Self::Internal(_) => {
                exit_code::GENERAL
            }
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation { message } => Self::Validation { message },
            CoreError::InvalidState { operation, state } => Self::Validation {
                message: format!("cannot {operation} while the poll is {state}"),
            },
            CoreError::Connection { reason } => Self::Connection { reason },
            CoreError::Timeout => Self::Timeout,
            CoreError::NotFound { what } => Self::NotFound { what },
            CoreError::Api { message, .. } => Self::Api { message },
            CoreError::Config { message } => Self::Config { message },
            CoreError::Internal(message) => Self::Internal(message),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Config {
            message: err.to_string(),
        }
    }
}
