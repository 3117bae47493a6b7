//! Client error types.

use thiserror::Error;

/// Errors surfaced by [`crate::ApiClient`].
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure: connection refused, timeout, TLS.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("API error ({status}): {detail}")]
    Api {
        status: u16,
        /// Server-provided `detail`, or the status text.
        detail: String,
    },

    /// Object storage rejected a direct upload.
    #[error("upload of {filename} failed with status {status}")]
    Upload { status: u16, filename: String },

    /// A success response did not match the expected shape.
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl ApiError {
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } | Self::Upload { status, .. } => Some(*status),
            Self::Http(_) | Self::Decode(_) => None,
        }
    }

    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api { status: 401, .. })
    }

    /// Message suitable for showing to a user. Errors without a typed
    /// detail collapse to `fallback`.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Api { detail, .. } if !detail.is_empty() => detail.clone(),
            Self::Upload { .. } => self.to_string(),
            _ => fallback.to_string(),
        }
    }
}
