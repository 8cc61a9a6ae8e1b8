// Bearer-token auth context.
//
// One `AuthContext` is owned by the session and shared with the client.
// Reads vastly outnumber writes (every request loads the token, writes
// happen only on login/logout), so the token lives behind an `ArcSwap`:
// a store is visible to every subsequent load, while a request already
// in flight keeps the `Arc` it loaded and completes under the old token.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use secrecy::SecretString;

/// Holds the current bearer credential, if any.
///
/// Construct once, thread into [`PollClient`](crate::PollClient) -- there
/// are no ambient statics. An absent token means anonymous requests.
#[derive(Debug, Default)]
pub struct AuthContext {
    token: ArcSwapOption<SecretString>,
}

impl AuthContext {
    /// An anonymous context with no credential.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A context pre-loaded with a bearer token.
    pub fn with_token(token: SecretString) -> Self {
        Self {
            token: ArcSwapOption::from(Some(Arc::new(token))),
        }
    }

    /// Replace the current token. Visible to every request issued after
    /// this call returns.
    pub fn set_token(&self, token: SecretString) {
        self.token.store(Some(Arc::new(token)));
    }

    /// Drop the current credential; subsequent requests are anonymous.
    pub fn clear(&self) {
        self.token.store(None);
    }

    /// Load the current token. The returned `Arc` pins the credential
    /// for the duration of the request that loaded it.
    pub fn token(&self) -> Option<Arc<SecretString>> {
        self.token.load_full()
    }

    /// Whether a credential is currently set.
    pub fn is_authenticated(&self) -> bool {
        self.token.load().is_some()
    }
}
