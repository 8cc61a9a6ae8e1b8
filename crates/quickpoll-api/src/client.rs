// QuickPoll service HTTP client
//
// Wraps `reqwest::Client` with base-URL construction, bearer-token
// injection from the shared `AuthContext`, and uniform status handling.
// Every endpoint is an inherent method; no retries happen here -- retry
// policy belongs to callers.

use std::sync::Arc;

use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::auth::AuthContext;
use crate::error::Error;
use crate::transport::TransportConfig;
use crate::types::{
    CreatePollRequest, PollCreated, PollDetails, PollsByName, ResultsPayload, VoteRequest,
};

/// Raw HTTP client for the QuickPoll service.
///
/// Attaches the current bearer token (if any) to every request and maps
/// any non-2xx response to [`Error::Status`] with the raw body preserved
/// -- including expected statuses like `409`, which are data to callers,
/// not exceptions.
pub struct PollClient {
    http: reqwest::Client,
    base_url: Url,
    auth: Arc<AuthContext>,
}

impl PollClient {
    /// Create a new client for the service rooted at `base_url`.
    ///
    /// The URL must parse and use an http(s) scheme -- a bad endpoint is
    /// a configuration error at construction, not on first call. A
    /// missing trailing slash is added so relative joins behave.
    pub fn new(
        base_url: &str,
        auth: Arc<AuthContext>,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let mut url = Url::parse(base_url).map_err(|e| Error::Config {
            message: format!("invalid service URL '{base_url}': {e}"),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::Config {
                message: format!("service URL must be http(s), got '{}'", url.scheme()),
            });
        }

        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url: url,
            auth,
        })
    }

    /// The service base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The auth context this client reads tokens from.
    pub fn auth(&self) -> &Arc<AuthContext> {
        &self.auth
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// Create a poll: `POST create/`.
    pub async fn create_poll(&self, req: &CreatePollRequest<'_>) -> Result<PollCreated, Error> {
        let url = self.endpoint("create/")?;
        let body = self.post(url, req).await?;
        parse_json(&body)
    }

    /// Fetch a poll's metadata and votable options: `GET {code}/`.
    pub async fn poll_details(&self, code: &str) -> Result<PollDetails, Error> {
        let url = self.endpoint(&format!("{code}/"))?;
        let body = self.get(url).await?;
        parse_json(&body)
    }

    /// Submit a vote: `POST {code}/vote/`.
    ///
    /// A duplicate vote comes back as `Err(Error::Status { status: 409, .. })`
    /// -- the coordinator classifies it, not this layer.
    pub async fn submit_vote(&self, code: &str, req: &VoteRequest<'_>) -> Result<(), Error> {
        let url = self.endpoint(&format!("{code}/vote/"))?;
        self.post(url, req).await?;
        Ok(())
    }

    /// Fetch current results: `GET {code}/results/`.
    pub async fn results(&self, code: &str) -> Result<ResultsPayload, Error> {
        let url = self.endpoint(&format!("{code}/results/"))?;
        let body = self.get(url).await?;
        parse_json(&body)
    }

    /// Close a poll: `POST {code}/close/`.
    pub async fn close_poll(&self, code: &str) -> Result<(), Error> {
        let url = self.endpoint(&format!("{code}/close/"))?;
        let request = self.authorized(self.http.post(url.clone()));
        debug!("POST {}", url);
        Self::check_status(request.send().await.map_err(Error::Transport)?).await?;
        Ok(())
    }

    /// Search polls by name: `GET name/{name}/`.
    ///
    /// The service answers 404 when nothing matches; callers decide
    /// whether that means "empty" or "error".
    pub async fn polls_by_name(&self, name: &str) -> Result<PollsByName, Error> {
        let url = self.endpoint(&format!("name/{}/", name.trim()))?;
        let body = self.get(url).await?;
        parse_json(&body)
    }

    // ── Request helpers ──────────────────────────────────────────────

    fn endpoint(&self, path: &str) -> Result<Url, Error> {
        self.base_url.join(path).map_err(Error::InvalidUrl)
    }

    /// Attach the current bearer token, if one is set. The token `Arc`
    /// loaded here rides with the request -- a concurrent token swap
    /// never patches a request already in flight.
    fn authorized(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.auth.token() {
            Some(token) => req.bearer_auth(token.expose_secret()),
            None => req,
        }
    }

    async fn get(&self, url: Url) -> Result<String, Error> {
        debug!("GET {}", url);
        let resp = self
            .authorized(self.http.get(url))
            .send()
            .await
            .map_err(Error::Transport)?;
        Self::check_status(resp).await
    }

    async fn post(&self, url: Url, body: &impl Serialize) -> Result<String, Error> {
        debug!("POST {}", url);
        let resp = self
            .authorized(self.http.post(url))
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;
        Self::check_status(resp).await
    }

    async fn check_status(resp: reqwest::Response) -> Result<String, Error> {
        let status = resp.status();
        let body = resp.text().await.map_err(Error::Transport)?;

        if status.is_success() {
            Ok(body)
        } else {
            Err(Error::Status {
                status: status.as_u16(),
                body,
            })
        }
    }
}

fn parse_json<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
    serde_json::from_str(body).map_err(|e| Error::Deserialization {
        message: e.to_string(),
        body: body.to_owned(),
    })
}
