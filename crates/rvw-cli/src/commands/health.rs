use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `rvw health`. No sign-in needed.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let status = ctx
        .client
        .health()
        .await
        .with_context(|| format!("backend at {} is unreachable", ctx.client.base_url()))?;
    output(&status, flags.format)
}
