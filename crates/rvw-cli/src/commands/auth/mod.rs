mod google;
mod login;
mod logout;
mod register;
mod status;
mod token;

use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuthCommands;
use crate::context::AppContext;

/// Handle `rvw auth <subcommand>`.
pub async fn handle(
    action: &AuthCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        AuthCommands::Register(args) => register::handle(args, ctx, flags).await,
        AuthCommands::Login(args) => login::handle(args, ctx, flags).await,
        AuthCommands::Google { no_browser } => google::handle(*no_browser, ctx, flags).await,
        AuthCommands::Token { token } => token::handle(token, ctx, flags).await,
        AuthCommands::Status => status::handle(ctx, flags).await,
        AuthCommands::Logout => logout::handle(ctx, flags),
    }
}

/// Body printed after any successful sign-in.
#[derive(Serialize)]
struct SignedInResponse {
    authenticated: bool,
    user_id: String,
    email: String,
    name: String,
}

impl SignedInResponse {
    fn of(user: &rvw_core::entities::UserIdentity) -> Self {
        Self {
            authenticated: true,
            user_id: user.id.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
        }
    }
}

fn require_password(password: Option<&str>) -> anyhow::Result<&str> {
    password
        .filter(|value| !value.is_empty())
        .ok_or_else(|| anyhow::anyhow!("password required: pass --password or set RVW_PASSWORD"))
}
