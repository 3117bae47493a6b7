//! # rvw-templates
//!
//! Reusable rule templates: an editable [`TemplateDraft`] validated before
//! submission, a [`TemplateCache`] updated optimistically from server
//! responses, and a [`TemplateManager`] that ties the two to the API.

pub mod cache;
pub mod draft;
pub mod error;
pub mod manager;

pub use cache::TemplateCache;
pub use draft::TemplateDraft;
pub use error::{DraftError, TemplateError};
pub use manager::{TemplateApi, TemplateManager};
