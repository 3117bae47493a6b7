mod delete;
mod export;
mod list;
mod new;
mod show;
mod watch;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ReviewCommands;
use crate::context::AppContext;

/// Handle `rvw review`. Every action needs a signed-in user.
pub async fn handle(
    action: &ReviewCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    ctx.require_auth().await?;

    match action {
        ReviewCommands::New(args) => new::handle(args, ctx, flags).await,
        ReviewCommands::Watch { id } => watch::follow(id, ctx, flags).await,
        ReviewCommands::Show { id } => show::handle(id, ctx, flags).await,
        ReviewCommands::Export { id, out } => export::handle(id, out.as_deref(), ctx, flags).await,
        ReviewCommands::List {
            status,
            page,
            offset,
            limit,
        } => list::handle(status.as_deref(), *page, *offset, *limit, ctx, flags).await,
        ReviewCommands::Delete { id } => delete::handle(id, ctx, flags).await,
    }
}
