use rvw_client::ChatSession;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ChatArgs;
use crate::context::AppContext;
use crate::output::output_view;
use crate::progress::Progress;

#[derive(Serialize)]
struct ChatResponse {
    reply: String,
    cost: Option<String>,
}

/// Handle `rvw chat`: one turn, optionally grounded in a review.
pub async fn handle(args: &ChatArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.require_auth().await?;

    let mut chat = ChatSession::new(&ctx.client, args.review.clone());
    let spinner = Progress::spinner("Thinking");
    let reply = match chat.send(&args.message).await {
        Ok(reply) => reply,
        Err(error) => {
            spinner.finish_err("chat failed");
            anyhow::bail!(error.user_message("Chat request failed"));
        }
    };
    spinner.finish_clear();

    let response = ChatResponse {
        cost: reply.usage.as_ref().map(rvw_core::entities::Usage::cost_label),
        reply: reply.reply,
    };
    output_view(&response, &format!("{}\n", response.reply), flags.format)
}
