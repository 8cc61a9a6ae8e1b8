// ── Runtime session configuration ──
//
// Describes *how* to reach the poll service. Carries credential data
// and tuning, but never touches disk -- the CLI builds a `SessionConfig`
// from its config file and hands it in.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

/// Configuration for one session against the poll service.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Service base URL (e.g. `https://polls.example/api/quickpolls/`).
    pub service_url: Url,
    /// Bearer token to start with, if already logged in.
    pub token: Option<SecretString>,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Interval between live-result refresh ticks.
    pub refresh_interval: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            service_url: "http://127.0.0.1:8000/api/quickpolls/"
                .parse()
                .expect("default service URL parses"),
            token: None,
            timeout: Duration::from_secs(30),
            refresh_interval: Duration::from_secs(4),
        }
    }
}
