// ── Session ──
//
// The explicitly constructed context object: owns the auth context and
// the shared HTTP client, and hands out controllers that borrow them.
// There is no ambient session state anywhere in the workspace -- whoever
// builds the `Session` decides who gets to see it.

use std::sync::Arc;

use secrecy::SecretString;

use quickpoll_api::{AuthContext, PollClient, TransportConfig};

use crate::config::SessionConfig;
use crate::error::CoreError;
use crate::lifecycle::PollController;
use crate::model::{NamedPoll, PollResults, ResultsSnapshot};

/// One login session against the poll service.
///
/// Cheaply cloneable; clones share the same client and token.
#[derive(Clone)]
pub struct Session {
    client: Arc<PollClient>,
    auth: Arc<AuthContext>,
    config: SessionConfig,
}

impl Session {
    /// Build a session from configuration.
    ///
    /// A bad service URL fails here, before any request is made.
    pub fn new(config: SessionConfig) -> Result<Self, CoreError> {
        let auth = Arc::new(match &config.token {
            Some(token) => AuthContext::with_token(token.clone()),
            None => AuthContext::anonymous(),
        });

        let transport = TransportConfig {
            timeout: config.timeout,
        };
        let client = Arc::new(PollClient::new(
            config.service_url.as_str(),
            Arc::clone(&auth),
            &transport,
        )?);

        Ok(Self {
            client,
            auth,
            config,
        })
    }

    /// Install a bearer token (teacher or participant login). Requests
    /// already in flight complete under the previous token.
    pub fn login(&self, token: SecretString) {
        self.auth.set_token(token);
    }

    /// Clear the current credential.
    pub fn logout(&self) {
        self.auth.clear();
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth.is_authenticated()
    }

    /// The shared HTTP client.
    pub fn client(&self) -> &Arc<PollClient> {
        &self.client
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// A fresh lifecycle controller for one poll. Each poll owns its
    /// own controller and refresh loop; nothing is shared between polls
    /// except this session's client and token.
    pub fn controller(&self) -> PollController {
        PollController::new(Arc::clone(&self.client), self.config.refresh_interval)
    }

    /// Search past polls by name.
    pub async fn lookup_by_name(&self, name: &str) -> Result<Vec<NamedPoll>, CoreError> {
        crate::lifecycle::lookup_by_name(&self.client, name).await
    }

    /// Fetch one poll's current results without starting a refresh
    /// loop. The snapshot is normalized and aggregated exactly as the
    /// poller would.
    pub async fn results_once(&self, code: &str) -> Result<PollResults, CoreError> {
        let payload = self.client.results(code.trim()).await?;
        Ok(crate::aggregate::aggregate(&ResultsSnapshot::from(payload)))
    }

    /// Close a poll by code without driving a full lifecycle -- for
    /// tooling that addresses a poll it did not create. The service
    /// treats closing an already-closed poll as a success.
    pub async fn close_by_code(&self, code: &str) -> Result<(), CoreError> {
        self.client.close_poll(code.trim()).await?;
        Ok(())
    }
}
