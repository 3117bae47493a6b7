use anyhow::Context;
use rvw_templates::{TemplateDraft, TemplateManager};

use super::{ChecklistMerge, apply_rule_args, user_error};
use crate::cli::GlobalFlags;
use crate::cli::subcommands::template::TemplateUpdateArgs;
use crate::context::AppContext;
use crate::output::output;

/// Seed a draft from the stored template, apply the flags, and send every
/// field back so the server copy matches the draft.
pub async fn handle(
    args: &TemplateUpdateArgs,
    manager: &mut TemplateManager,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let current = ctx
        .client
        .get_template(&args.id)
        .await
        .with_context(|| format!("failed to fetch template {}", args.id))?;

    let mut draft = TemplateDraft::from_template(&current);
    if let Some(name) = &args.name {
        draft.name.clone_from(name);
    }
    if args.clear_checklists {
        draft.checklists.clear();
    }
    apply_rule_args(&mut draft, &args.rules, ChecklistMerge::Replace)?;

    let updated = manager
        .update(&args.id, &draft)
        .await
        .map_err(|error| user_error(error, "Failed to update template"))?;
    output(&updated, flags.format)
}
