use rvw_core::responses::HealthStatus;

use crate::{ApiClient, ApiError};

impl ApiClient {
    /// Backend liveness and database status.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the backend is unreachable or unhealthy.
    pub async fn health(&self) -> Result<HealthStatus, ApiError> {
        self.get("/health").await
    }
}
