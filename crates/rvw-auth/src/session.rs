//! In-memory session state and the hydration gate.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use rvw_core::entities::UserIdentity;

use crate::error::AuthError;
use crate::storage::{KeyValueStore, TOKEN_KEY};

/// Resolves the identity behind the currently persisted token.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// # Errors
    ///
    /// Returns [`AuthError::Identity`] when the backend rejects the token or
    /// cannot be reached.
    async fn current_user(&self) -> Result<UserIdentity, AuthError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<UserIdentity>,
    pub is_loading: bool,
}

impl Default for Session {
    /// Fresh session before hydration.
    fn default() -> Self {
        Self {
            token: None,
            user: None,
            is_loading: true,
        }
    }
}

impl Session {
    fn signed_out() -> Self {
        Self {
            is_loading: false,
            ..Self::default()
        }
    }
}

static SIGNED_OUT: Session = Session {
    token: None,
    user: None,
    is_loading: false,
};

/// Shared flag an HTTP client raises when the backend rejects the token.
///
/// Cloned into the client's unauthorized hook; the owning [`SessionStore`]
/// reads as signed out from the moment it is raised until the next sign-in.
#[derive(Debug, Clone, Default)]
pub struct SessionExpiry(Arc<AtomicBool>);

impl SessionExpiry {
    pub fn expire(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Decision for a command that needs an authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthGate<'a> {
    Loading,
    Authenticated(&'a UserIdentity),
    RedirectToLogin,
}

/// Owns the session for the lifetime of the process.
///
/// Mutation goes through `&mut self`, so a single owner drives every
/// transition. The token is mirrored into the injected [`KeyValueStore`]; the
/// HTTP client reads it from there on every request.
pub struct SessionStore {
    storage: Arc<dyn KeyValueStore>,
    identity: Arc<dyn IdentityProvider>,
    state: Session,
    expiry: SessionExpiry,
}

impl SessionStore {
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStore>, identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            storage,
            identity,
            state: Session::default(),
            expiry: SessionExpiry::default(),
        }
    }

    /// Share an expiry flag created before the store, typically one already
    /// handed to the HTTP client.
    #[must_use]
    pub fn with_expiry(mut self, expiry: SessionExpiry) -> Self {
        self.expiry = expiry;
        self
    }

    /// Handle that signs this session out when raised.
    #[must_use]
    pub fn expiry(&self) -> SessionExpiry {
        self.expiry.clone()
    }

    /// Current session. Reads as signed out once the expiry flag is raised.
    #[must_use]
    pub fn session(&self) -> &Session {
        if self.expiry.is_expired() && !self.state.is_loading {
            return &SIGNED_OUT;
        }
        &self.state
    }

    #[must_use]
    pub fn gate(&self) -> AuthGate<'_> {
        let session = self.session();
        if session.is_loading {
            return AuthGate::Loading;
        }
        session
            .user
            .as_ref()
            .map_or(AuthGate::RedirectToLogin, AuthGate::Authenticated)
    }

    /// The authenticated user, or [`AuthError::NotAuthenticated`].
    ///
    /// # Errors
    ///
    /// Fails while loading or when no user is signed in.
    pub fn require_user(&self) -> Result<&UserIdentity, AuthError> {
        match self.gate() {
            AuthGate::Authenticated(user) => Ok(user),
            AuthGate::Loading | AuthGate::RedirectToLogin => Err(AuthError::NotAuthenticated),
        }
    }

    /// Persist the token and sign the user in.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Storage`] if the token cannot be persisted; the
    /// in-memory session is left untouched in that case.
    pub fn set_auth(&mut self, token: String, user: UserIdentity) -> Result<(), AuthError> {
        self.storage.set(TOKEN_KEY, &token)?;
        tracing::info!(user = %user.email, "signed in");
        self.state = Session {
            token: Some(token),
            user: Some(user),
            is_loading: false,
        };
        self.expiry.reset();
        Ok(())
    }

    /// Sign out. The in-memory session is always cleared, even when the
    /// persisted token cannot be removed.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Storage`] if the persisted token survives.
    pub fn logout(&mut self) -> Result<(), AuthError> {
        self.state = Session::signed_out();
        self.expiry.reset();
        self.storage.remove(TOKEN_KEY)
    }

    /// Hydrate from storage. Ends with `is_loading == false` on every path.
    pub async fn load_from_storage(&mut self) {
        let Some(token) = self.storage.get(TOKEN_KEY) else {
            self.state = Session::signed_out();
            return;
        };

        match self.identity.current_user().await {
            Ok(user) => {
                tracing::debug!(user = %user.email, "session restored");
                self.state = Session {
                    token: Some(token),
                    user: Some(user),
                    is_loading: false,
                };
                self.expiry.reset();
            }
            Err(error) => {
                tracing::warn!(%error, "stored token rejected; clearing session");
                self.clear_quietly();
            }
        }
    }

    /// Adopt a token handed over by an external sign-in flow (OAuth callback).
    ///
    /// # Errors
    ///
    /// Returns the identity lookup error after clearing the token, or a
    /// storage error if the token cannot be persisted.
    pub async fn adopt_token(&mut self, token: String) -> Result<&UserIdentity, AuthError> {
        self.storage.set(TOKEN_KEY, &token)?;
        match self.identity.current_user().await {
            Ok(user) => {
                self.set_auth(token, user)?;
                self.require_user()
            }
            Err(error) => {
                self.clear_quietly();
                Err(error)
            }
        }
    }

    fn clear_quietly(&mut self) {
        self.state = Session::signed_out();
        self.expiry.reset();
        if let Err(error) = self.storage.remove(TOKEN_KEY) {
            tracing::warn!(%error, "failed to clear stored token");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use pretty_assertions::assert_eq;
    use rvw_core::timestamp::Timestamp;

    use super::*;
    use crate::storage::MemoryStore;

    fn user(id: &str) -> UserIdentity {
        UserIdentity {
            id: id.into(),
            email: "a@b.com".into(),
            name: "Ada".into(),
            is_active: true,
            created_at: Timestamp::from("2025-02-01T09:00:00"),
        }
    }

    /// Answers `current_user` from a script and counts calls.
    struct ScriptedIdentity {
        answers: Mutex<Vec<Result<UserIdentity, AuthError>>>,
        calls: AtomicUsize,
    }

    impl ScriptedIdentity {
        fn new(answers: Vec<Result<UserIdentity, AuthError>>) -> Arc<Self> {
            Arc::new(Self {
                answers: Mutex::new(answers),
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl IdentityProvider for ScriptedIdentity {
        async fn current_user(&self) -> Result<UserIdentity, AuthError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.answers.lock().unwrap().remove(0)
        }
    }

    fn store_with(
        storage: &Arc<MemoryStore>,
        identity: &Arc<ScriptedIdentity>,
    ) -> SessionStore {
        SessionStore::new(storage.clone(), identity.clone())
    }

    #[test]
    fn fresh_store_is_loading() {
        let storage = Arc::new(MemoryStore::new());
        let identity = ScriptedIdentity::new(vec![]);
        let store = store_with(&storage, &identity);
        assert_eq!(store.gate(), AuthGate::Loading);
        assert!(matches!(store.require_user(), Err(AuthError::NotAuthenticated)));
    }

    #[tokio::test]
    async fn hydration_without_token_skips_identity_call() {
        let storage = Arc::new(MemoryStore::new());
        let identity = ScriptedIdentity::new(vec![]);
        let mut store = store_with(&storage, &identity);

        store.load_from_storage().await;

        assert_eq!(store.gate(), AuthGate::RedirectToLogin);
        assert_eq!(identity.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn hydration_adopts_identity_for_valid_token() {
        let storage = Arc::new(MemoryStore::with_token("t1"));
        let identity = ScriptedIdentity::new(vec![Ok(user("u1"))]);
        let mut store = store_with(&storage, &identity);

        store.load_from_storage().await;

        assert_eq!(store.gate(), AuthGate::Authenticated(&user("u1")));
        assert_eq!(store.session().token.as_deref(), Some("t1"));
    }

    #[tokio::test]
    async fn hydration_clears_rejected_token() {
        let storage = Arc::new(MemoryStore::with_token("stale"));
        let identity =
            ScriptedIdentity::new(vec![Err(AuthError::Identity("Unauthorized".into()))]);
        let mut store = store_with(&storage, &identity);

        store.load_from_storage().await;

        assert_eq!(store.gate(), AuthGate::RedirectToLogin);
        assert_eq!(store.session(), &Session::signed_out());
        assert!(storage.get(TOKEN_KEY).is_none());
    }

    #[test]
    fn set_auth_then_logout() {
        let storage = Arc::new(MemoryStore::new());
        let identity = ScriptedIdentity::new(vec![]);
        let mut store = store_with(&storage, &identity);

        store.set_auth("t1".into(), user("u1")).unwrap();
        assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("t1"));
        assert!(matches!(store.gate(), AuthGate::Authenticated(u) if u.id == "u1"));

        store.set_auth("t2".into(), user("u2")).unwrap();
        assert_eq!(store.session().token.as_deref(), Some("t2"));
        assert_eq!(store.require_user().unwrap().id, "u2");

        store.logout().unwrap();
        assert!(storage.get(TOKEN_KEY).is_none());
        assert_eq!(store.session().user, None);
        assert_eq!(store.gate(), AuthGate::RedirectToLogin);
    }

    #[tokio::test]
    async fn adopt_token_signs_in_on_success() {
        let storage = Arc::new(MemoryStore::new());
        let identity = ScriptedIdentity::new(vec![Ok(user("u9"))]);
        let mut store = store_with(&storage, &identity);

        let adopted = store.adopt_token("oauth-token".into()).await.unwrap();
        assert_eq!(adopted.id, "u9");
        assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("oauth-token"));
    }

    #[tokio::test]
    async fn adopt_token_clears_on_failure() {
        let storage = Arc::new(MemoryStore::new());
        let identity = ScriptedIdentity::new(vec![Err(AuthError::Identity("bad token".into()))]);
        let mut store = store_with(&storage, &identity);

        let err = store.adopt_token("junk".into()).await.unwrap_err();
        assert!(err.to_string().contains("bad token"));
        assert!(storage.get(TOKEN_KEY).is_none());
        assert_eq!(store.gate(), AuthGate::RedirectToLogin);
    }

    #[test]
    fn raised_expiry_signs_out_until_next_sign_in() {
        let storage = Arc::new(MemoryStore::new());
        let identity = ScriptedIdentity::new(vec![]);
        let expiry = SessionExpiry::default();
        let mut store = store_with(&storage, &identity).with_expiry(expiry.clone());

        store.set_auth("t1".into(), user("u1")).unwrap();
        expiry.expire();

        assert_eq!(store.gate(), AuthGate::RedirectToLogin);
        assert_eq!(store.session(), &Session::signed_out());
        assert!(matches!(store.require_user(), Err(AuthError::NotAuthenticated)));

        store.set_auth("t2".into(), user("u2")).unwrap();
        assert!(!expiry.is_expired());
        assert!(matches!(store.gate(), AuthGate::Authenticated(u) if u.id == "u2"));
    }
}
