use serde::{Deserialize, Serialize};

use crate::timestamp::Timestamp;

/// Authenticated user as returned by `/api/auth/me` and the login endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserIdentity {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Timestamp,
}

const fn default_active() -> bool {
    true
}

/// Response of `register` and `login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenResponse {
    pub token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub user: UserIdentity,
}

fn default_token_type() -> String {
    "bearer".to_string()
}
