//! Minimal key-value persistence capability.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::error::AuthError;

/// Storage key the session token lives under.
pub const TOKEN_KEY: &str = "token";

/// Persisted string storage shared by the session store and the HTTP client.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    /// # Errors
    ///
    /// Returns [`AuthError::Storage`] if the value cannot be persisted.
    fn set(&self, key: &str, value: &str) -> Result<(), AuthError>;

    /// Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Storage`] if an existing value cannot be removed.
    fn remove(&self, key: &str) -> Result<(), AuthError>;
}

/// Process-local store. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a session token.
    #[must_use]
    pub fn with_token(token: &str) -> Self {
        let store = Self::new();
        store
            .values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(TOKEN_KEY.to_string(), token.to_string());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AuthError> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), AuthError> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}
