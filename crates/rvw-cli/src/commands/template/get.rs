use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn handle(template_id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let template = ctx
        .client
        .get_template(template_id)
        .await
        .with_context(|| format!("failed to fetch template {template_id}"))?;
    output(&template, flags.format)
}
