//! Template CRUD over the API with cache maintenance.

use std::sync::Arc;

use async_trait::async_trait;
use rvw_client::{ApiClient, ApiError};
use rvw_core::entities::{RuleTemplate, TemplateCreateRequest, TemplateUpdateRequest};

use crate::cache::TemplateCache;
use crate::draft::TemplateDraft;
use crate::error::TemplateError;

/// The rule-template endpoints.
#[async_trait]
pub trait TemplateApi: Send + Sync {
    async fn list(&self) -> Result<Vec<RuleTemplate>, ApiError>;
    async fn create(&self, request: &TemplateCreateRequest) -> Result<RuleTemplate, ApiError>;
    async fn update(
        &self,
        template_id: &str,
        request: &TemplateUpdateRequest,
    ) -> Result<RuleTemplate, ApiError>;
    async fn delete(&self, template_id: &str) -> Result<(), ApiError>;
}

#[async_trait]
impl TemplateApi for ApiClient {
    async fn list(&self) -> Result<Vec<RuleTemplate>, ApiError> {
        self.list_templates().await
    }

    async fn create(&self, request: &TemplateCreateRequest) -> Result<RuleTemplate, ApiError> {
        self.create_template(request).await
    }

    async fn update(
        &self,
        template_id: &str,
        request: &TemplateUpdateRequest,
    ) -> Result<RuleTemplate, ApiError> {
        self.update_template(template_id, request).await
    }

    async fn delete(&self, template_id: &str) -> Result<(), ApiError> {
        self.delete_template(template_id).await
    }
}

/// Validates drafts before they reach the API and keeps a [`TemplateCache`]
/// in step with each successful response.
pub struct TemplateManager {
    api: Arc<dyn TemplateApi>,
    cache: TemplateCache,
}

impl TemplateManager {
    #[must_use]
    pub fn new(api: Arc<dyn TemplateApi>) -> Self {
        Self {
            api,
            cache: TemplateCache::new(),
        }
    }

    #[must_use]
    pub const fn cache(&self) -> &TemplateCache {
        &self.cache
    }

    /// Re-fetch the list, replacing the cache.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Api`]; the cache is left as it was.
    pub async fn load(&mut self) -> Result<&[RuleTemplate], TemplateError> {
        let templates = self.api.list().await?;
        tracing::debug!(count = templates.len(), "templates loaded");
        self.cache.replace_all(templates);
        Ok(self.cache.templates())
    }

    /// # Errors
    ///
    /// Returns [`TemplateError::Draft`] without calling the API when the
    /// draft is invalid, or [`TemplateError::Api`] if the backend rejects it.
    pub async fn create(&mut self, draft: &TemplateDraft) -> Result<&RuleTemplate, TemplateError> {
        let request = draft.to_create_request()?;
        let created = self.api.create(&request).await?;
        tracing::info!(template_id = %created.id, "template created");
        self.cache.created(created);
        Ok(&self.cache.templates()[0])
    }

    /// # Errors
    ///
    /// See [`Self::create`].
    pub async fn update(
        &mut self,
        template_id: &str,
        draft: &TemplateDraft,
    ) -> Result<RuleTemplate, TemplateError> {
        let request = draft.to_update_request()?;
        let updated = self.api.update(template_id, &request).await?;
        tracing::info!(template_id = %updated.id, "template updated");
        self.cache.updated(updated.clone());
        Ok(updated)
    }

    /// # Errors
    ///
    /// Returns [`TemplateError::Api`]; the cache keeps the entry on failure.
    pub async fn delete(&mut self, template_id: &str) -> Result<(), TemplateError> {
        self.api.delete(template_id).await?;
        tracing::info!(template_id, "template deleted");
        self.cache.deleted(template_id);
        Ok(())
    }
}
