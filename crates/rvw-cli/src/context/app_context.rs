use std::sync::Arc;

use anyhow::Context;
use rvw_auth::{
    AuthError, AuthGate, CredentialStore, IdentityProvider, KeyValueStore, SessionExpiry,
    SessionStore,
};
use rvw_client::{ApiClient, LoginRedirect};
use rvw_config::RvwConfig;
use rvw_core::entities::UserIdentity;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub config: RvwConfig,
    pub credentials: Arc<CredentialStore>,
    pub client: Arc<ApiClient>,
    pub session: SessionStore,
}

impl AppContext {
    /// Wire the credential store, HTTP client, and session together.
    ///
    /// The client and the session share one token store, so a token written
    /// by `set_auth` is what the next request sends. A `401` clears it and
    /// raises the session's expiry flag, so the in-memory session signs out
    /// too.
    pub fn init(config: RvwConfig) -> anyhow::Result<Self> {
        let credentials = Arc::new(CredentialStore::new(
            config.auth.keyring_service.clone(),
            config.auth.credentials_dir(),
        ));
        let storage: Arc<dyn KeyValueStore> = credentials.clone();

        let expiry = SessionExpiry::default();
        let expired = expiry.clone();
        let redirect: Arc<dyn LoginRedirect> = Arc::new(move || {
            expired.expire();
            notify_login_required();
        });
        let client = Arc::new(
            ApiClient::from_config(&config.api, Arc::clone(&storage))
                .context("failed to build HTTP client")?
                .with_login_redirect(redirect),
        );
        tracing::debug!(base_url = %client.base_url(), "api client ready");

        let identity: Arc<dyn IdentityProvider> = client.clone();
        let session = SessionStore::new(storage, identity).with_expiry(expiry);

        Ok(Self {
            config,
            credentials,
            client,
            session,
        })
    }

    /// Hydrate the session and require a signed-in user.
    pub async fn require_auth(&mut self) -> anyhow::Result<UserIdentity> {
        self.session.load_from_storage().await;
        match self.session.gate() {
            AuthGate::Authenticated(user) => Ok(user.clone()),
            AuthGate::Loading | AuthGate::RedirectToLogin => Err(AuthError::NotAuthenticated.into()),
        }
    }
}

fn notify_login_required() {
    eprintln!("Session expired. Sign in again with `rvw auth login`.");
}
