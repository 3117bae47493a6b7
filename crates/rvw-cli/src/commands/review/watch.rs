use std::sync::Arc;

use rvw_core::entities::Review;
use rvw_review::{PollState, PollerHandle, ReviewScreen, ReviewSource};
use tokio::sync::watch;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output_view;
use crate::progress::Progress;

const WAITING: &str = "Waiting for review status";

/// Poll `review_id` until it completes or fails, then render the outcome.
pub async fn follow(review_id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let source: Arc<dyn ReviewSource> = ctx.client.clone();
    let poller = PollerHandle::spawn(source, review_id, ctx.config.review.poll_interval());
    let mut updates = poller.subscribe();
    let spinner = Progress::spinner(WAITING);

    let outcome = tokio::select! {
        state = track(&mut updates, &spinner) => state,
        _ = tokio::signal::ctrl_c() => {
            poller.cancel();
            spinner.finish_err("stopped watching");
            anyhow::bail!("interrupted; resume with `rvw review watch {review_id}`");
        }
    };
    spinner.finish_clear();

    match &outcome {
        PollState::Snapshot(review) => {
            output_view(review, &outcome.screen(), flags.format)?;
            ensure_succeeded(review)
        }
        PollState::FetchError(message) => anyhow::bail!("{message}"),
        PollState::Loading => anyhow::bail!("polling stopped before the first status arrived"),
    }
}

/// A review the pipeline marked failed still exits non-zero after its
/// screen is shown.
fn ensure_succeeded(review: &Review) -> anyhow::Result<()> {
    match review.failure() {
        Some("") => anyhow::bail!("review {} failed", review.short_id()),
        Some(message) => anyhow::bail!("review {} failed: {message}", review.short_id()),
        None => Ok(()),
    }
}

/// Mirror each published state onto the spinner until one is final.
async fn track(updates: &mut watch::Receiver<PollState>, spinner: &Progress) -> PollState {
    loop {
        let state = updates.borrow_and_update().clone();
        if state.is_final() {
            return state;
        }
        spinner.set_message(&status_line(&state));
        if updates.changed().await.is_err() {
            return updates.borrow().clone();
        }
    }
}

fn status_line(state: &PollState) -> String {
    let ReviewScreen::Progress(view) = state.screen() else {
        return WAITING.to_string();
    };
    let Some(stage) = view.active() else {
        return "Queued".to_string();
    };

    let mut line = stage.phase.label().to_string();
    if let Some((done, total)) = stage.groups {
        line = format!("{line} ({done}/{total})");
    }
    if let Some(detail) = &view.detail {
        line = format!("{line} - {detail}");
    }
    line
}
