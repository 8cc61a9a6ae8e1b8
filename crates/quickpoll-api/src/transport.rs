// Shared transport configuration for building reqwest::Client instances.
//
// Kept separate from the endpoint client so timeout tuning has a single
// home and tests can build clients with short deadlines.

use std::time::Duration;

/// Transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, crate::error::Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent("quickpoll/0.1.0")
            .build()
            .map_err(|e| crate::error::Error::Config {
                message: format!("failed to build HTTP client: {e}"),
            })
    }
}
