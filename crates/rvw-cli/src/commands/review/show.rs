use anyhow::Context;
use rvw_review::ReviewScreen;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output_view;

/// One fetch, no polling.
pub async fn handle(review_id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let review = ctx
        .client
        .get_review(review_id)
        .await
        .with_context(|| format!("failed to fetch review {review_id}"))?;
    output_view(&review, &ReviewScreen::for_review(&review), flags.format)
}
