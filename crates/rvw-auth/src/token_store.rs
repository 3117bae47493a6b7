//! Keychain-backed [`KeyValueStore`] with env and file fallbacks.
//!
//! Reads try the OS keychain, then `RVW_AUTH__<KEY>`, then a `0600` file
//! under the credentials directory. Writes go to the keychain and fall back
//! to the file when the keychain is unavailable.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::AuthError;
use crate::storage::KeyValueStore;

const ENV_PREFIX: &str = "RVW_AUTH__";

#[derive(Debug, Clone)]
pub struct CredentialStore {
    service: String,
    dir: Option<PathBuf>,
    use_keyring: bool,
}

impl CredentialStore {
    /// `dir` is where fallback credential files live; `None` disables the
    /// file tier (no home directory).
    #[must_use]
    pub fn new(service: impl Into<String>, dir: Option<PathBuf>) -> Self {
        Self {
            service: service.into(),
            dir,
            use_keyring: true,
        }
    }

    /// Skip the OS keychain entirely. Used by tests and headless CI.
    #[must_use]
    pub fn without_keyring(mut self) -> Self {
        self.use_keyring = false;
        self
    }

    /// Which tier currently holds `key`, for `auth status`.
    #[must_use]
    pub fn detect_source(&self, key: &str) -> Option<&'static str> {
        if self.keyring_get(key).is_some() {
            return Some("keyring");
        }
        if env_get(key).is_some() {
            return Some("env");
        }
        if self.file_get(key).is_some() {
            return Some("file");
        }
        None
    }

    fn entry(&self, key: &str) -> Option<keyring::Entry> {
        if !self.use_keyring {
            return None;
        }
        match keyring::Entry::new(&self.service, key) {
            Ok(entry) => Some(entry),
            Err(error) => {
                tracing::debug!(%error, "keyring unavailable");
                None
            }
        }
    }

    fn keyring_get(&self, key: &str) -> Option<String> {
        self.entry(key)
            .and_then(|entry| entry.get_password().ok())
            .filter(|value| !value.is_empty())
    }

    fn file_path(&self, key: &str) -> Result<PathBuf, AuthError> {
        self.dir.as_ref().map(|dir| dir.join(key)).ok_or_else(|| {
            AuthError::Storage("home directory not found; cannot store credentials".into())
        })
    }

    fn file_get(&self, key: &str) -> Option<String> {
        let path = self.file_path(key).ok()?;
        fs::read_to_string(&path)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    fn file_set(&self, key: &str, value: &str) -> Result<(), AuthError> {
        let path = self.file_path(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| AuthError::Storage(format!("mkdir {}: {e}", parent.display())))?;
            restrict(parent, 0o700);
        }
        fs::write(&path, value)
            .map_err(|e| AuthError::Storage(format!("write {}: {e}", path.display())))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o600))
                .map_err(|e| AuthError::Storage(format!("chmod {}: {e}", path.display())))?;
        }
        Ok(())
    }
}

impl KeyValueStore for CredentialStore {
    fn get(&self, key: &str) -> Option<String> {
        self.keyring_get(key)
            .or_else(|| env_get(key))
            .or_else(|| self.file_get(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AuthError> {
        let Some(entry) = self.entry(key) else {
            return self.file_set(key, value);
        };
        match entry.set_password(value) {
            // Platforms without a native backend accept writes they never return.
            Ok(()) if self.keyring_get(key).as_deref() == Some(value) => Ok(()),
            Ok(()) => {
                tracing::warn!("keyring did not persist credential; falling back to file");
                self.file_set(key, value)
            }
            Err(error) if self.dir.is_none() => Err(AuthError::Keyring(error.to_string())),
            Err(error) => {
                tracing::warn!(%error, "keyring store failed; falling back to file");
                self.file_set(key, value)
            }
        }
    }

    /// Clears the keychain and file tiers. An env-provided value is outside
    /// the store's control and stays visible to later reads.
    fn remove(&self, key: &str) -> Result<(), AuthError> {
        if let Some(entry) = self.entry(key) {
            let _ = entry.delete_credential();
        }
        if env_get(key).is_some() {
            tracing::warn!(var = %env_var_name(key), "credential still provided by environment");
        }

        let Ok(path) = self.file_path(key) else {
            return Ok(());
        };
        if path.exists() {
            fs::remove_file(&path).map_err(|e| {
                AuthError::Storage(format!("failed to delete {}: {e}", path.display()))
            })?;
        }
        Ok(())
    }
}

fn env_var_name(key: &str) -> String {
    format!("{ENV_PREFIX}{}", key.to_uppercase().replace('-', "_"))
}

fn env_get(key: &str) -> Option<String> {
    std::env::var(env_var_name(key))
        .ok()
        .filter(|value| !value.is_empty())
}

#[cfg_attr(not(unix), allow(unused_variables))]
fn restrict(path: &Path, mode: u32) {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Err(e) = fs::set_permissions(path, fs::Permissions::from_mode(mode)) {
            tracing::warn!("failed to chmod {mode:o} {}: {e}", path.display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_store(dir: &Path) -> CredentialStore {
        CredentialStore::new("rvw-cli-test", Some(dir.join("creds"))).without_keyring()
    }

    #[test]
    fn env_var_name_is_uppercased() {
        assert_eq!(env_var_name("token"), "RVW_AUTH__TOKEN");
        assert_eq!(env_var_name("refresh-token"), "RVW_AUTH__REFRESH_TOKEN");
    }

    #[test]
    fn file_store_set_get_remove_cycle() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let store = file_store(tmp.path());

        store.set("cycle-key", "jwt_abc123").expect("set");
        assert_eq!(store.get("cycle-key").as_deref(), Some("jwt_abc123"));
        assert_eq!(store.detect_source("cycle-key"), Some("file"));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(tmp.path().join("creds").join("cycle-key"))
                .expect("metadata")
                .permissions()
                .mode()
                & 0o777;
            assert_eq!(mode, 0o600, "credentials file should be 0600");
        }

        store.remove("cycle-key").expect("remove");
        assert!(store.get("cycle-key").is_none());
        assert!(store.detect_source("cycle-key").is_none());
    }

    #[test]
    fn whitespace_only_file_reads_as_missing() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let store = file_store(tmp.path());
        fs::create_dir_all(tmp.path().join("creds")).expect("mkdir");
        fs::write(tmp.path().join("creds").join("blank-key"), "   \n  ").expect("write");

        assert!(store.get("blank-key").is_none());
    }

    #[test]
    fn missing_dir_fails_writes_but_not_removes() {
        let store = CredentialStore::new("rvw-cli-test", None).without_keyring();
        assert!(matches!(store.set("k", "v"), Err(AuthError::Storage(_))));
        assert!(store.remove("k").is_ok());
        assert!(store.get("no-such-key").is_none());
    }
}
