//! Presigned direct uploads and the review start call.

use reqwest::header;
use rvw_core::entities::{PresignRequest, PresignResponse, PresignedFile, ReviewStarted};

use crate::{ApiClient, ApiError};

impl ApiClient {
    /// Reserve a review id and one upload URL per filename.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a rejected request.
    pub async fn presign(&self, request: &PresignRequest) -> Result<PresignResponse, ApiError> {
        self.post("/api/upload/presign", request).await
    }

    /// Transfer one file's bytes straight to object storage.
    ///
    /// The request carries no credentials and bypasses the backend's error
    /// handling; the presigned URL is the only authorization.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Upload`] on a non-success status from storage and
    /// [`ApiError::Http`] on transport failure.
    pub async fn put_object(
        &self,
        slot: &PresignedFile,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), ApiError> {
        tracing::debug!(filename = %slot.filename, bytes = body.len(), "direct upload");
        let resp = self
            .http
            .put(&slot.upload_url)
            .header(header::CONTENT_TYPE, content_type)
            .body(body)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(ApiError::Upload {
                status: resp.status().as_u16(),
                filename: slot.filename.clone(),
            });
        }
        Ok(())
    }

    /// Commit an uploaded review into processing.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or if the backend refuses to
    /// start the review.
    pub async fn start_review(&self, review_id: &str) -> Result<ReviewStarted, ApiError> {
        let path = format!("/api/reviews/{}/start", urlencoding::encode(review_id));
        self.request::<_, ()>(reqwest::Method::POST, &path, None)
            .await
    }
}
