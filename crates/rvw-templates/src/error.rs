use rvw_client::ApiError;
use thiserror::Error;

/// A draft that must not be submitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("template name is required")]
    EmptyName,

    #[error("add a checklist or cross-validation rules")]
    NoRules,

    #[error("document type {0:?} has more than one checklist")]
    DuplicateDocType(String),
}

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error(transparent)]
    Draft(#[from] DraftError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl TemplateError {
    /// Validation messages as-is, API failures by detail or `fallback`.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Draft(err) => err.to_string(),
            Self::Api(err) => err.user_message(fallback),
        }
    }
}
