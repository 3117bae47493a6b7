use rvw_client::ApiError;

use super::{SignedInResponse, require_password};
use crate::cli::GlobalFlags;
use crate::cli::subcommands::auth::AuthRegisterArgs;
use crate::context::AppContext;
use crate::output::output;

const REGISTER_FALLBACK: &str = "Registration failed";

pub async fn handle(
    args: &AuthRegisterArgs,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let password = require_password(args.password.as_deref())?;

    let response = ctx
        .client
        .register(&args.email, password, &args.name)
        .await
        .map_err(|error: ApiError| anyhow::anyhow!(error.user_message(REGISTER_FALLBACK)))?;

    ctx.session.set_auth(response.token, response.user)?;
    let user = ctx.session.require_user()?;
    output(&SignedInResponse::of(user), flags.format)
}
