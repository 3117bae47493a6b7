//! Entity structs for the review backend's resources.
//!
//! Each struct mirrors one JSON payload of the REST API. All derive
//! `Serialize` and `Deserialize`; list-valued fields default to empty so a
//! sparse payload still decodes.

mod chat;
mod review;
mod template;
mod upload;
mod user;

pub use chat::{ChatMessage, ChatReply, ChatRequest};
pub use review::{
    ChecklistItem, CrossValidationItem, DocumentResult, Review, ReviewPage, ReviewProgress,
    ReviewResult, ReviewStarted, ReviewSummary, Usage,
};
pub use template::{
    CustomChecklist, RuleTemplate, TemplateCreateRequest, TemplateRules, TemplateUpdateRequest,
};
pub use upload::{PresignRequest, PresignResponse, PresignedFile};
pub use user::{TokenResponse, UserIdentity};
