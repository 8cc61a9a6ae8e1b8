use thiserror::Error;

/// Top-level error type for the `quickpoll-api` crate.
///
/// Covers configuration, transport, and decoding failures. Service
/// responses with a non-2xx status are carried verbatim in
/// [`Status`](Error::Status) -- including expected statuses like `409`,
/// which callers classify into domain outcomes. `quickpoll-core` maps
/// these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Configuration ───────────────────────────────────────────────
    /// Invalid or missing service endpoint. Raised at client
    /// construction, never deferred to the first request.
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error while building a request path.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The service answered with a non-2xx status. The raw body is
    /// preserved so callers can extract the service's own message.
    #[error("Service returned HTTP {status}")]
    Status { status: u16, body: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// The HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` for a `409 Conflict` response -- the service's way
    /// of saying a participant already has a recorded vote.
    pub fn is_conflict(&self) -> bool {
        self.status() == Some(409)
    }

    /// Returns `true` for a `404 Not Found` response.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns `true` if this is a transient transport failure worth
    /// retrying by a caller that owns a retry policy.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }
}
