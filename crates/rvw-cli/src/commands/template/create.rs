use rvw_templates::{TemplateDraft, TemplateManager};

use super::{ChecklistMerge, apply_rule_args, user_error};
use crate::cli::GlobalFlags;
use crate::cli::subcommands::template::TemplateCreateArgs;
use crate::output::output;

pub async fn handle(
    args: &TemplateCreateArgs,
    manager: &mut TemplateManager,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let mut draft = TemplateDraft::new(args.name.clone());
    apply_rule_args(&mut draft, &args.rules, ChecklistMerge::Append)?;

    let created = manager
        .create(&draft)
        .await
        .map_err(|error| user_error(error, "Failed to create template"))?;
    output(created, flags.format)
}
