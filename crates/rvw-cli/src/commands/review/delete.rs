use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct DeleteResponse {
    deleted: bool,
    review_id: String,
    detail: Option<String>,
}

pub async fn handle(review_id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let ack = ctx.client.delete_review(review_id).await?;
    output(
        &DeleteResponse {
            deleted: true,
            review_id: review_id.to_string(),
            detail: ack.detail,
        },
        flags.format,
    )
}
