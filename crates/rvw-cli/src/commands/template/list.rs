use rvw_core::entities::RuleTemplate;
use rvw_core::enums::RuleMode;
use rvw_templates::TemplateManager;
use serde::Serialize;

use super::user_error;
use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Serialize)]
struct TemplateRow {
    id: String,
    name: String,
    mode: RuleMode,
    doc_types: Vec<String>,
    updated: String,
}

impl From<&RuleTemplate> for TemplateRow {
    fn from(template: &RuleTemplate) -> Self {
        Self {
            id: template.id.clone(),
            name: template.name.clone(),
            mode: template.rules.mode,
            doc_types: template
                .rules
                .doc_types()
                .into_iter()
                .map(str::to_string)
                .collect(),
            updated: template.updated_at.display_short(),
        }
    }
}

pub async fn handle(manager: &mut TemplateManager, flags: &GlobalFlags) -> anyhow::Result<()> {
    let templates = manager
        .load()
        .await
        .map_err(|error| user_error(error, "Failed to load templates"))?;
    let rows = templates.iter().map(TemplateRow::from).collect::<Vec<_>>();
    output(&rows, flags.format)
}
