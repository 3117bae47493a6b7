use rvw_client::ApiError;

use super::{SignedInResponse, require_password};
use crate::cli::GlobalFlags;
use crate::cli::subcommands::auth::AuthLoginArgs;
use crate::context::AppContext;
use crate::output::output;

const LOGIN_FALLBACK: &str = "Login failed";

pub async fn handle(
    args: &AuthLoginArgs,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let password = require_password(args.password.as_deref())?;

    let response = ctx
        .client
        .login(&args.email, password)
        .await
        .map_err(|error: ApiError| anyhow::anyhow!(error.user_message(LOGIN_FALLBACK)))?;

    ctx.session.set_auth(response.token, response.user)?;
    let user = ctx.session.require_user()?;
    output(&SignedInResponse::of(user), flags.format)
}
