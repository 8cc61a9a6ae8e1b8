// ── Core error types ──
//
// User-facing errors from quickpoll-core. Consumers never see HTTP
// status codes or JSON parse failures directly; the
// `From<quickpoll_api::Error>` impl translates transport-layer errors
// into domain-appropriate variants, exactly once.

use quickpoll_api::types::extract_api_message;
use thiserror::Error;

/// Unified error type for the core crate.
///
/// Note that a duplicate vote is NOT an error -- it surfaces as
/// [`VoteOutcome::AlreadyVoted`](crate::vote::VoteOutcome::AlreadyVoted).
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Local input errors (no network call was made) ────────────────
    #[error("Validation failed: {message}")]
    Validation { message: String },

    #[error("Cannot {operation} while the poll is {state}")]
    InvalidState {
        operation: &'static str,
        state: &'static str,
    },

    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach the poll service: {reason}")]
    Connection { reason: String },

    #[error("Request timed out")]
    Timeout,

    // ── Service errors ───────────────────────────────────────────────
    #[error("Not found: {what}")]
    NotFound { what: String },

    #[error("Service rejected the request: {message}")]
    Api { status: Option<u16>, message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<quickpoll_api::Error> for CoreError {
    fn from(err: quickpoll_api::Error) -> Self {
        match err {
            quickpoll_api::Error::Config { message } => CoreError::Config { message },
            quickpoll_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("invalid URL: {e}"),
            },
            quickpoll_api::Error::Transport(e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::Connection {
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        status: e.status().map(|s| s.as_u16()),
                        message: e.to_string(),
                    }
                }
            }
            quickpoll_api::Error::Status { status: 404, body } => CoreError::NotFound {
                what: extract_api_message(&body),
            },
            quickpoll_api::Error::Status { status, body } => CoreError::Api {
                status: Some(status),
                message: extract_api_message(&body),
            },
            quickpoll_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("deserialization error: {message}"))
            }
        }
    }
}
