use serde::{Deserialize, Serialize};

/// Body of `POST /api/upload/presign`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PresignRequest {
    pub filenames: Vec<String>,
    pub template_id: Option<String>,
    pub custom_rules: Option<String>,
}

/// One upload slot: a time-limited direct-upload URL for one file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PresignedFile {
    pub filename: String,
    pub upload_url: String,
    /// Object key in the storage bucket. The backend names it `r2_key`.
    #[serde(rename = "r2_key", alias = "storage_key")]
    pub storage_key: String,
}

/// Response of `POST /api/upload/presign`.
///
/// `files` corresponds positionally to the submitted filenames.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PresignResponse {
    pub review_id: String,
    pub files: Vec<PresignedFile>,
    /// Seconds until the upload URLs expire.
    pub expires_in: u64,
}
