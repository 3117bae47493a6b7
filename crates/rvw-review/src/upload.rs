//! Three-phase upload: presign, direct transfer, commit.
//!
//! File bytes go straight from the client to object storage through
//! per-file presigned URLs; the backend only sees filenames. A failure in
//! any phase aborts the rest and leaves nothing committed. Objects already
//! transferred by a failed attempt are orphaned, and a retry starts over
//! from presign.

use std::path::Path;

use async_trait::async_trait;
use futures::future::try_join_all;
use rvw_client::{ApiClient, ApiError};
use rvw_core::entities::{PresignRequest, PresignResponse, PresignedFile, ReviewStarted};

use crate::error::UploadError;

/// MIME types the review pipeline can read.
pub const ACCEPTED_TYPES: [&str; 3] = ["application/pdf", "image/jpeg", "image/png"];

/// The backend calls an upload needs.
#[async_trait]
pub trait UploadBackend: Send + Sync {
    async fn presign(&self, request: &PresignRequest) -> Result<PresignResponse, ApiError>;

    async fn put_object(
        &self,
        slot: &PresignedFile,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), ApiError>;

    async fn start_review(&self, review_id: &str) -> Result<ReviewStarted, ApiError>;
}

#[async_trait]
impl UploadBackend for ApiClient {
    async fn presign(&self, request: &PresignRequest) -> Result<PresignResponse, ApiError> {
        Self::presign(self, request).await
    }

    async fn put_object(
        &self,
        slot: &PresignedFile,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), ApiError> {
        Self::put_object(self, slot, body, content_type).await
    }

    async fn start_review(&self, review_id: &str) -> Result<ReviewStarted, ApiError> {
        Self::start_review(self, review_id).await
    }
}

/// One selected document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    /// Accept a file whose name maps to PDF, JPEG or PNG.
    ///
    /// # Errors
    ///
    /// Returns [`UploadError::UnsupportedFile`] for any other type.
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Result<Self, UploadError> {
        let filename = filename.into();
        let content_type = mime_guess::from_path(&filename)
            .iter()
            .map(|mime| mime.essence_str().to_string())
            .find(|essence| ACCEPTED_TYPES.contains(&essence.as_str()))
            .ok_or_else(|| UploadError::UnsupportedFile(filename.clone()))?;
        Ok(Self {
            filename,
            content_type,
            bytes,
        })
    }

    /// Read a file from disk, named by its final path component.
    ///
    /// # Errors
    ///
    /// Returns [`UploadError::UnsupportedFile`] before touching the disk if
    /// the type is not accepted, or [`UploadError::Io`] if reading fails.
    pub async fn read(path: &Path) -> Result<Self, UploadError> {
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| UploadError::UnsupportedFile(path.display().to_string()))?;
        let mut file = Self::new(filename, Vec::new())?;
        file.bytes = tokio::fs::read(path).await.map_err(|source| UploadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(file)
    }
}

/// Files selected for one review plus the rule options sent at presign.
///
/// Consumed by [`UploadSession::submit`].
#[derive(Debug, Default)]
pub struct UploadSession {
    files: Vec<UploadFile>,
    template_id: Option<String>,
    custom_rules: Option<String>,
}

impl UploadSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, file: UploadFile) {
        self.files.push(file);
    }

    pub fn remove(&mut self, index: usize) -> Option<UploadFile> {
        (index < self.files.len()).then(|| self.files.remove(index))
    }

    #[must_use]
    pub fn files(&self) -> &[UploadFile] {
        &self.files
    }

    /// Blank ids mean "no template".
    #[must_use]
    pub fn with_template(mut self, template_id: Option<String>) -> Self {
        self.template_id = template_id.filter(|id| !id.trim().is_empty());
        self
    }

    #[must_use]
    pub fn with_custom_rules(mut self, rules: Option<String>) -> Self {
        self.custom_rules = rules.filter(|r| !r.trim().is_empty());
        self
    }

    fn presign_request(&self) -> PresignRequest {
        PresignRequest {
            filenames: self.files.iter().map(|f| f.filename.clone()).collect(),
            template_id: self.template_id.clone(),
            custom_rules: self.custom_rules.clone(),
        }
    }

    /// Run presign, the parallel transfers, and the start call.
    ///
    /// # Errors
    ///
    /// Returns [`UploadError::NoFiles`] for an empty session,
    /// [`UploadError::SlotMismatch`] if the backend issues the wrong number
    /// of upload slots, and [`UploadError::Api`] for the first failing call.
    /// The review is never started unless every transfer succeeded.
    pub async fn submit<B>(self, backend: &B) -> Result<ReviewStarted, UploadError>
    where
        B: UploadBackend + ?Sized,
    {
        if self.files.is_empty() {
            return Err(UploadError::NoFiles);
        }

        let presigned = backend.presign(&self.presign_request()).await?;
        if presigned.files.len() != self.files.len() {
            return Err(UploadError::SlotMismatch {
                requested: self.files.len(),
                returned: presigned.files.len(),
            });
        }
        tracing::info!(
            review_id = %presigned.review_id,
            files = self.files.len(),
            "uploading documents"
        );

        let transfers = presigned
            .files
            .iter()
            .zip(self.files)
            .map(|(slot, file)| async move {
                backend
                    .put_object(slot, file.bytes, &file.content_type)
                    .await
            });
        try_join_all(transfers).await?;

        let started = backend.start_review(&presigned.review_id).await?;
        tracing::info!(review_id = %started.review_id, "review started");
        Ok(started)
    }
}
