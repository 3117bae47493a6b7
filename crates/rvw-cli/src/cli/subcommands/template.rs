use clap::{Args, Subcommand};

/// Rule template commands.
#[derive(Clone, Debug, Subcommand)]
pub enum TemplateCommands {
    /// List templates.
    List,
    /// Get a template by ID.
    Get { id: String },
    /// Create a template.
    Create(TemplateCreateArgs),
    /// Replace a template's fields.
    Update(TemplateUpdateArgs),
    /// Delete a template.
    Delete { id: String },
}

/// Rule fields shared by create and update.
#[derive(Clone, Debug, Default, Args)]
pub struct TemplateRuleArgs {
    #[arg(long)]
    pub description: Option<String>,
    /// supplement or replace.
    #[arg(long)]
    pub mode: Option<String>,
    /// Custom checklist as DOC_TYPE=TEXT. Repeatable.
    #[arg(long, value_name = "DOC_TYPE=TEXT")]
    pub checklist: Vec<String>,
    /// Cross-document validation rules.
    #[arg(long)]
    pub cross_rules: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct TemplateCreateArgs {
    #[arg(long)]
    pub name: String,
    #[command(flatten)]
    pub rules: TemplateRuleArgs,
}

#[derive(Clone, Debug, Args)]
pub struct TemplateUpdateArgs {
    pub id: String,
    #[arg(long)]
    pub name: Option<String>,
    /// Drop existing checklists before applying --checklist.
    #[arg(long)]
    pub clear_checklists: bool,
    #[command(flatten)]
    pub rules: TemplateRuleArgs,
}
