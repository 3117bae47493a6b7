//! `/api/reviews` endpoints.

use reqwest::Method;
use rvw_core::entities::{Review, ReviewPage};
use rvw_core::enums::ReviewStatus;
use rvw_core::responses::DeleteAck;

use crate::{ApiClient, ApiError};

fn review_path(review_id: &str) -> String {
    format!("/api/reviews/{}", urlencoding::encode(review_id))
}

fn list_path(limit: u32, offset: u32, status: Option<ReviewStatus>) -> String {
    let mut path = format!("/api/reviews?limit={limit}&offset={offset}");
    if let Some(status) = status {
        path.push_str("&status=");
        path.push_str(status.as_str());
    }
    path
}

impl ApiClient {
    /// Current status snapshot of one review.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or an unknown review.
    pub async fn get_review(&self, review_id: &str) -> Result<Review, ApiError> {
        self.get(&review_path(review_id)).await
    }

    /// One page of the caller's reviews, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport or server failure.
    pub async fn list_reviews(
        &self,
        limit: u32,
        offset: u32,
        status: Option<ReviewStatus>,
    ) -> Result<ReviewPage, ApiError> {
        self.get(&list_path(limit, offset, status)).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or an unknown review.
    pub async fn delete_review(&self, review_id: &str) -> Result<DeleteAck, ApiError> {
        self.request::<_, ()>(Method::DELETE, &review_path(review_id), None)
            .await
    }
}
