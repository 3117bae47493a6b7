use serde::{Deserialize, Serialize};

use crate::enums::RuleMode;
use crate::timestamp::Timestamp;

/// Extra checklist text for one document type.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CustomChecklist {
    pub doc_type: String,
    pub checklist_md: String,
}

/// Rule payload of a template.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TemplateRules {
    #[serde(default, deserialize_with = "RuleMode::deserialize_lenient")]
    pub mode: RuleMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase2_checklists: Option<Vec<CustomChecklist>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cross_validation_rules: Option<String>,
}

impl TemplateRules {
    /// Document types that carry a custom checklist, in declaration order.
    #[must_use]
    pub fn doc_types(&self) -> Vec<&str> {
        self.phase2_checklists
            .iter()
            .flatten()
            .map(|c| c.doc_type.as_str())
            .collect()
    }
}

/// A reusable rule template owned by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RuleTemplate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub rules: TemplateRules,
    #[serde(default)]
    pub created_at: Timestamp,
    #[serde(default)]
    pub updated_at: Timestamp,
}

/// Body of `POST /api/rule-templates`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TemplateCreateRequest {
    pub name: String,
    pub description: Option<String>,
    pub rules: TemplateRules,
}

/// Body of `PUT /api/rule-templates/{id}`. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TemplateUpdateRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub rules: Option<TemplateRules>,
}
