//! `/api/rule-templates` endpoints.

use reqwest::Method;
use rvw_core::entities::{RuleTemplate, TemplateCreateRequest, TemplateUpdateRequest};

use crate::{ApiClient, ApiError};

const TEMPLATES: &str = "/api/rule-templates";

fn template_path(template_id: &str) -> String {
    format!("{TEMPLATES}/{}", urlencoding::encode(template_id))
}

impl ApiClient {
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport or server failure.
    pub async fn list_templates(&self) -> Result<Vec<RuleTemplate>, ApiError> {
        self.get(TEMPLATES).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or an unknown template.
    pub async fn get_template(&self, template_id: &str) -> Result<RuleTemplate, ApiError> {
        self.get(&template_path(template_id)).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the backend rejects the template.
    pub async fn create_template(
        &self,
        request: &TemplateCreateRequest,
    ) -> Result<RuleTemplate, ApiError> {
        self.post(TEMPLATES, request).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the template is unknown or the update is rejected.
    pub async fn update_template(
        &self,
        template_id: &str,
        request: &TemplateUpdateRequest,
    ) -> Result<RuleTemplate, ApiError> {
        self.request(Method::PUT, &template_path(template_id), Some(request))
            .await
    }

    /// The backend answers with an empty object, which is discarded.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or an unknown template.
    pub async fn delete_template(&self, template_id: &str) -> Result<(), ApiError> {
        self.request_empty::<()>(Method::DELETE, &template_path(template_id), None)
            .await
    }
}
