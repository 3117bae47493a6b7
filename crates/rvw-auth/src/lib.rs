//! # rvw-auth
//!
//! Authentication state for the rvw client.
//!
//! Provides the [`KeyValueStore`] capability the session token is persisted
//! through (an in-memory store for tests, an OS-keychain store with file
//! fallback for real use), and the [`SessionStore`] that owns the in-memory
//! session and gates protected commands on hydration.

pub mod error;
pub mod session;
pub mod storage;
pub mod token_store;

pub use error::AuthError;
pub use session::{AuthGate, IdentityProvider, Session, SessionExpiry, SessionStore};
pub use storage::{KeyValueStore, MemoryStore, TOKEN_KEY};
pub use token_store::CredentialStore;
