//! Editable template form state and its validation.

use std::collections::HashSet;

use rvw_core::entities::{
    CustomChecklist, RuleTemplate, TemplateCreateRequest, TemplateRules, TemplateUpdateRequest,
};
use rvw_core::enums::RuleMode;

use crate::error::DraftError;

/// A template being created or edited.
///
/// Checklist rows may be incomplete while editing; only rows with both a
/// document type and non-blank text are submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateDraft {
    pub name: String,
    pub description: String,
    pub mode: RuleMode,
    pub checklists: Vec<CustomChecklist>,
    pub cross_validation_rules: String,
}

impl TemplateDraft {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Seed an edit form from an existing template.
    #[must_use]
    pub fn from_template(template: &RuleTemplate) -> Self {
        let rules = &template.rules;
        Self {
            name: template.name.clone(),
            description: template.description.clone().unwrap_or_default(),
            mode: rules.mode,
            checklists: rules.phase2_checklists.clone().unwrap_or_default(),
            cross_validation_rules: rules.cross_validation_rules.clone().unwrap_or_default(),
        }
    }

    pub fn add_checklist(&mut self, doc_type: impl Into<String>, checklist_md: impl Into<String>) {
        self.checklists.push(CustomChecklist {
            doc_type: doc_type.into(),
            checklist_md: checklist_md.into(),
        });
    }

    pub fn remove_checklist(&mut self, index: usize) -> Option<CustomChecklist> {
        (index < self.checklists.len()).then(|| self.checklists.remove(index))
    }

    /// Document types already taken by a row.
    #[must_use]
    pub fn used_doc_types(&self) -> Vec<&str> {
        self.checklists
            .iter()
            .map(|c| c.doc_type.as_str())
            .filter(|t| !t.is_empty())
            .collect()
    }

    fn complete_checklists(&self) -> impl Iterator<Item = &CustomChecklist> {
        self.checklists
            .iter()
            .filter(|c| !c.doc_type.trim().is_empty() && !c.checklist_md.trim().is_empty())
    }

    /// At least one complete checklist or non-blank cross-validation rules.
    #[must_use]
    pub fn has_content(&self) -> bool {
        self.complete_checklists().next().is_some()
            || !self.cross_validation_rules.trim().is_empty()
    }

    /// # Errors
    ///
    /// Returns the first [`DraftError`] found: blank name, a repeated
    /// document type, or no content. Rows without a document type are left
    /// out of the payload rather than rejected.
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.name.trim().is_empty() {
            return Err(DraftError::EmptyName);
        }

        let mut seen = HashSet::new();
        for row in &self.checklists {
            let doc_type = row.doc_type.trim();
            if doc_type.is_empty() {
                continue;
            }
            if !seen.insert(doc_type) {
                return Err(DraftError::DuplicateDocType(doc_type.to_string()));
            }
        }

        if !self.has_content() {
            return Err(DraftError::NoRules);
        }
        Ok(())
    }

    /// Rules payload: the mode, complete checklists (omitted when none),
    /// and cross-validation rules when non-blank.
    #[must_use]
    pub fn rules(&self) -> TemplateRules {
        let checklists: Vec<CustomChecklist> = self.complete_checklists().cloned().collect();
        TemplateRules {
            mode: self.mode,
            phase2_checklists: (!checklists.is_empty()).then_some(checklists),
            cross_validation_rules: Some(self.cross_validation_rules.clone())
                .filter(|r| !r.trim().is_empty()),
        }
    }

    fn description_payload(&self) -> Option<String> {
        Some(self.description.clone()).filter(|d| !d.trim().is_empty())
    }

    /// # Errors
    ///
    /// See [`Self::validate`].
    pub fn to_create_request(&self) -> Result<TemplateCreateRequest, DraftError> {
        self.validate()?;
        Ok(TemplateCreateRequest {
            name: self.name.clone(),
            description: self.description_payload(),
            rules: self.rules(),
        })
    }

    /// Full replacement of name, description and rules.
    ///
    /// # Errors
    ///
    /// See [`Self::validate`].
    pub fn to_update_request(&self) -> Result<TemplateUpdateRequest, DraftError> {
        self.validate()?;
        Ok(TemplateUpdateRequest {
            name: Some(self.name.clone()),
            description: self.description_payload(),
            rules: Some(self.rules()),
        })
    }
}
