//! Credential storage settings.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_keyring_service() -> String {
    String::from("rvw-cli")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// OS keychain service name the session token is stored under.
    #[serde(default = "default_keyring_service")]
    pub keyring_service: String,

    /// Directory for the file fallback. Empty means `~/.rvw`.
    #[serde(default)]
    pub credentials_dir: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            keyring_service: default_keyring_service(),
            credentials_dir: String::new(),
        }
    }
}

impl AuthConfig {
    /// Resolve the credentials directory, if one can be determined.
    #[must_use]
    pub fn credentials_dir(&self) -> Option<PathBuf> {
        if self.credentials_dir.is_empty() {
            dirs::home_dir().map(|home| home.join(".rvw"))
        } else {
            Some(PathBuf::from(&self.credentials_dir))
        }
    }
}
