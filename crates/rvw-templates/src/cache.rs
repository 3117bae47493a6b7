//! Client-side list of templates, mutated from server responses.

use rvw_core::entities::RuleTemplate;

/// Last server response wins; there is no conflict resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateCache {
    templates: Vec<RuleTemplate>,
}

impl TemplateCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconcile with a fresh listing.
    pub fn replace_all(&mut self, templates: Vec<RuleTemplate>) {
        self.templates = templates;
    }

    /// Newly created templates go first.
    pub fn created(&mut self, template: RuleTemplate) {
        self.templates.insert(0, template);
    }

    /// Replace the entry with the same id. Returns `false` if none matched.
    pub fn updated(&mut self, template: RuleTemplate) -> bool {
        match self.templates.iter_mut().find(|t| t.id == template.id) {
            Some(slot) => {
                *slot = template;
                true
            }
            None => false,
        }
    }

    /// Returns `false` if no entry had that id.
    pub fn deleted(&mut self, template_id: &str) -> bool {
        let before = self.templates.len();
        self.templates.retain(|t| t.id != template_id);
        self.templates.len() != before
    }

    #[must_use]
    pub fn get(&self, template_id: &str) -> Option<&RuleTemplate> {
        self.templates.iter().find(|t| t.id == template_id)
    }

    #[must_use]
    pub fn templates(&self) -> &[RuleTemplate] {
        &self.templates
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
