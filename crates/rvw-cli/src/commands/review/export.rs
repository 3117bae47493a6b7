use std::path::{Path, PathBuf};

use anyhow::Context;
use rvw_review::ResultView;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct ExportResponse {
    review_id: String,
    path: PathBuf,
}

pub async fn handle(
    review_id: &str,
    out: Option<&Path>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let review = ctx
        .client
        .get_review(review_id)
        .await
        .with_context(|| format!("failed to fetch review {review_id}"))?;
    let view = ResultView::of(&review)?;

    let dir = match out {
        Some(dir) => dir.to_path_buf(),
        None => std::env::current_dir().context("failed to determine current directory")?,
    };
    let path = view.write_export(&dir)?;
    tracing::info!(path = %path.display(), "review exported");

    output(
        &ExportResponse {
            review_id: review.review_id.clone(),
            path,
        },
        flags.format,
    )
}
