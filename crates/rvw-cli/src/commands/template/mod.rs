mod create;
mod delete;
mod get;
mod list;
mod update;

use std::sync::Arc;

use rvw_templates::{TemplateApi, TemplateDraft, TemplateError, TemplateManager};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::TemplateCommands;
use crate::cli::subcommands::template::TemplateRuleArgs;
use crate::commands::shared::parse::{parse_checklist, parse_enum};
use crate::context::AppContext;

/// Handle `rvw template`. Every action needs a signed-in user.
pub async fn handle(
    action: &TemplateCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    ctx.require_auth().await?;

    let api: Arc<dyn TemplateApi> = ctx.client.clone();
    let mut manager = TemplateManager::new(api);

    match action {
        TemplateCommands::List => list::handle(&mut manager, flags).await,
        TemplateCommands::Get { id } => get::handle(id, ctx, flags).await,
        TemplateCommands::Create(args) => create::handle(args, &mut manager, flags).await,
        TemplateCommands::Update(args) => update::handle(args, &mut manager, ctx, flags).await,
        TemplateCommands::Delete { id } => delete::handle(id, &mut manager, flags).await,
    }
}

/// How `--checklist` rows combine with rows already on the draft.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ChecklistMerge {
    /// Append every row; repeated doc types fail validation.
    Append,
    /// A row for an existing doc type replaces that row's text.
    Replace,
}

fn apply_rule_args(
    draft: &mut TemplateDraft,
    args: &TemplateRuleArgs,
    merge: ChecklistMerge,
) -> anyhow::Result<()> {
    if let Some(description) = &args.description {
        draft.description.clone_from(description);
    }
    if let Some(mode) = &args.mode {
        draft.mode = parse_enum(mode, "mode")?;
    }
    for raw in &args.checklist {
        let (doc_type, text) = parse_checklist(raw)?;
        let existing = match merge {
            ChecklistMerge::Replace => draft.checklists.iter_mut().find(|c| c.doc_type == doc_type),
            ChecklistMerge::Append => None,
        };
        match existing {
            Some(row) => row.checklist_md = text,
            None => draft.add_checklist(doc_type, text),
        }
    }
    if let Some(rules) = &args.cross_rules {
        draft.cross_validation_rules.clone_from(rules);
    }
    Ok(())
}

fn user_error(error: TemplateError, fallback: &str) -> anyhow::Error {
    anyhow::anyhow!(error.user_message(fallback))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rvw_core::enums::RuleMode;

    use super::*;

    fn args(checklists: &[&str]) -> TemplateRuleArgs {
        TemplateRuleArgs {
            description: Some("Loan files".into()),
            mode: Some("replace".into()),
            checklist: checklists.iter().map(|c| (*c).to_string()).collect(),
            cross_rules: None,
        }
    }

    #[test]
    fn append_keeps_duplicate_rows_for_validation() {
        let mut draft = TemplateDraft::new("Loans");
        apply_rule_args(
            &mut draft,
            &args(&["invoice=Total present", "invoice=Tax id"]),
            ChecklistMerge::Append,
        )
        .expect("args apply");

        assert_eq!(draft.mode, RuleMode::Replace);
        assert_eq!(draft.description, "Loan files");
        assert_eq!(draft.checklists.len(), 2);
        assert!(draft.validate().is_err());
    }

    #[test]
    fn replace_overwrites_existing_doc_type() {
        let mut draft = TemplateDraft::new("Loans");
        draft.add_checklist("invoice", "old text");
        apply_rule_args(
            &mut draft,
            &args(&["invoice=new text", "receipt=Stamp visible"]),
            ChecklistMerge::Replace,
        )
        .expect("args apply");

        assert_eq!(draft.checklists.len(), 2);
        assert_eq!(draft.checklists[0].checklist_md, "new text");
        assert_eq!(draft.checklists[1].doc_type, "receipt");
    }

    #[test]
    fn bad_mode_is_rejected() {
        let mut draft = TemplateDraft::new("Loans");
        let bad = TemplateRuleArgs {
            mode: Some("override".into()),
            ..TemplateRuleArgs::default()
        };
        assert!(apply_rule_args(&mut draft, &bad, ChecklistMerge::Append).is_err());
    }
}
