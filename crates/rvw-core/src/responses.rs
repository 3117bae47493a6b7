//! Small response envelopes that do not warrant an entity module.

use serde::{Deserialize, Serialize};

/// Response of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthStatus {
    pub status: String,
    pub db: String,
}

/// Response of `GET /api/auth/google/authorize`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GoogleAuthorizeUrl {
    pub authorization_url: String,
}

/// Acknowledgement body returned by delete endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteAck {
    #[serde(default)]
    pub detail: Option<String>,
}
