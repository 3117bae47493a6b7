use anyhow::Context;

use super::SignedInResponse;
use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// OAuth callback: store the handed-back token and confirm it with `/me`.
pub async fn handle(token: &str, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let token = token.trim();
    if token.is_empty() {
        anyhow::bail!("token must not be empty");
    }

    let user = ctx
        .session
        .adopt_token(token.to_string())
        .await
        .context("sign-in token was rejected")?;
    output(&SignedInResponse::of(user), flags.format)
}
