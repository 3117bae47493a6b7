use std::path::PathBuf;

use rvw_client::ApiError;
use rvw_core::errors::CoreError;
use thiserror::Error;

/// Message shown when an upload fails without a server-provided detail.
pub const UPLOAD_FALLBACK: &str = "Upload failed";

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("no files selected")]
    NoFiles,

    #[error("unsupported file type: {0} (accepted: PDF, JPEG, PNG)")]
    UnsupportedFile(String),

    #[error("server issued {returned} upload slots for {requested} files")]
    SlotMismatch { requested: usize, returned: usize },

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl UploadError {
    /// Message to show the user: the server's detail for API failures,
    /// otherwise this error's own description.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(err) => err.user_message(UPLOAD_FALLBACK),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    NotExportable(#[from] CoreError),

    #[error("failed to serialize review result: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
