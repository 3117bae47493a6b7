use rvw_core::entities::Review;
use rvw_core::enums::ReviewStatus;
use serde::Serialize;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::shared::limit::{effective_limit, effective_offset};
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct ReviewRow {
    id: String,
    status: ReviewStatus,
    documents: Option<u32>,
    outcome: String,
}

impl From<&Review> for ReviewRow {
    fn from(review: &Review) -> Self {
        let summary = review.completed_result().map(|result| &result.summary);
        let outcome = match (review.failure(), summary) {
            (Some(error), _) => error.to_string(),
            (None, Some(summary)) => format!(
                "{} passed, {} warnings, {} failures",
                summary.passed, summary.warnings, summary.failures
            ),
            (None, None) => String::new(),
        };
        Self {
            id: review.short_id().to_string(),
            status: review.status,
            documents: summary.map(|summary| summary.total_docs),
            outcome,
        }
    }
}

#[derive(Serialize)]
struct ReviewListResponse<'a> {
    total: u64,
    offset: u32,
    limit: u32,
    reviews: &'a [Review],
}

pub async fn handle(
    status: Option<&str>,
    page: Option<u32>,
    offset: Option<u32>,
    limit: Option<u32>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let limit = effective_limit(limit, flags.limit, ctx.config.general.default_limit);
    let offset = effective_offset(offset, page, limit);
    let status = status
        .map(|value| parse_enum::<ReviewStatus>(value, "status"))
        .transpose()?;

    let page = ctx.client.list_reviews(limit, offset, status).await?;

    if flags.format != OutputFormat::Table {
        return output(
            &ReviewListResponse {
                total: page.total,
                offset,
                limit,
                reviews: &page.reviews,
            },
            flags.format,
        );
    }

    let rows = page.reviews.iter().map(ReviewRow::from).collect::<Vec<_>>();
    output(&rows, flags.format)?;
    if !flags.quiet {
        println!("{}", page_footer(offset, rows.len(), page.total));
    }
    Ok(())
}

fn page_footer(offset: u32, shown: usize, total: u64) -> String {
    if shown == 0 {
        return format!("0 of {total}");
    }
    let first = u64::from(offset) + 1;
    let last = u64::from(offset).saturating_add(u64::try_from(shown).unwrap_or(u64::MAX));
    format!("{first}-{last} of {total}")
}
