//! Fixed-interval review status polling.
//!
//! ```text
//! Loading ──fetch ok──► Snapshot(pending|processing) ──fetch ok──► Snapshot(completed|failed)
//!    │                         │
//!    └──────fetch err──────────┴──────────────► FetchError
//! ```
//!
//! The poll task fetches once immediately and then once per interval. It
//! exits after publishing a terminal snapshot or a fetch error; there are
//! no retries. The task is owned by a [`PollerHandle`] and aborted when the
//! handle is cancelled or dropped.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rvw_client::{ApiClient, ApiError};
use rvw_core::entities::Review;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::view::ReviewScreen;

const FETCH_FALLBACK: &str = "Failed to fetch review";

/// Source of review snapshots.
#[async_trait]
pub trait ReviewSource: Send + Sync {
    async fn fetch_review(&self, review_id: &str) -> Result<Review, ApiError>;
}

#[async_trait]
impl ReviewSource for ApiClient {
    async fn fetch_review(&self, review_id: &str) -> Result<Review, ApiError> {
        self.get_review(review_id).await
    }
}

/// What the poller has observed so far.
#[derive(Debug, Clone, PartialEq)]
pub enum PollState {
    /// No fetch has completed yet.
    Loading,
    /// Latest snapshot, replacing any earlier one.
    Snapshot(Review),
    /// A fetch failed; polling has stopped for good.
    FetchError(String),
}

impl PollState {
    /// No further state will be published.
    #[must_use]
    pub fn is_final(&self) -> bool {
        match self {
            Self::Loading => false,
            Self::Snapshot(review) => review.status.is_terminal(),
            Self::FetchError(_) => true,
        }
    }

    #[must_use]
    pub fn screen(&self) -> ReviewScreen<'_> {
        match self {
            Self::Loading => ReviewScreen::Loading,
            Self::Snapshot(review) => ReviewScreen::for_review(review),
            Self::FetchError(message) => ReviewScreen::FetchError(message),
        }
    }
}

/// Owns one running poll task.
#[derive(Debug)]
pub struct PollerHandle {
    review_id: String,
    state: watch::Receiver<PollState>,
    task: JoinHandle<()>,
}

impl PollerHandle {
    /// Start polling `review_id` on the current tokio runtime.
    #[must_use]
    pub fn spawn(
        source: Arc<dyn ReviewSource>,
        review_id: impl Into<String>,
        interval: Duration,
    ) -> Self {
        let review_id = review_id.into();
        let (tx, rx) = watch::channel(PollState::Loading);
        let task = tokio::spawn(poll_loop(source, review_id.clone(), interval, tx));
        Self {
            review_id,
            state: rx,
            task,
        }
    }

    #[must_use]
    pub fn review_id(&self) -> &str {
        &self.review_id
    }

    /// Latest published state.
    #[must_use]
    pub fn current(&self) -> PollState {
        self.state.borrow().clone()
    }

    /// A receiver that observes every subsequent state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<PollState> {
        self.state.clone()
    }

    /// Wait until polling reaches a final state, or the task goes away.
    pub async fn finished(&mut self) -> PollState {
        let settled = self
            .state
            .wait_for(PollState::is_final)
            .await
            .map(|state| state.clone());
        settled.unwrap_or_else(|_| self.current())
    }

    /// Stop polling. Idempotent.
    pub fn cancel(&self) {
        self.task.abort();
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn poll_loop(
    source: Arc<dyn ReviewSource>,
    review_id: String,
    interval: Duration,
    tx: watch::Sender<PollState>,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        if tx.is_closed() {
            tracing::debug!(%review_id, "no observers left; stopping poller");
            return;
        }

        match source.fetch_review(&review_id).await {
            Ok(review) => {
                let terminal = review.status.is_terminal();
                tracing::debug!(%review_id, status = %review.status, "polled review");
                tx.send_replace(PollState::Snapshot(review));
                if terminal {
                    tracing::info!(%review_id, "review reached a terminal state");
                    return;
                }
            }
            Err(error) => {
                tracing::warn!(%review_id, %error, "review fetch failed; polling stopped");
                tx.send_replace(PollState::FetchError(error.user_message(FETCH_FALLBACK)));
                return;
            }
        }
    }
}

/// Watches at most one review at a time.
///
/// Switching to another review drops the previous poller before the new one
/// starts, so a stale poller can never publish for a review no longer shown.
pub struct ReviewWatcher {
    source: Arc<dyn ReviewSource>,
    interval: Duration,
    current: Option<PollerHandle>,
}

impl ReviewWatcher {
    #[must_use]
    pub fn new(source: Arc<dyn ReviewSource>, interval: Duration) -> Self {
        Self {
            source,
            interval,
            current: None,
        }
    }

    /// Start watching `review_id`, replacing any previous poller.
    pub fn watch(&mut self, review_id: &str) -> &mut PollerHandle {
        self.stop();
        self.current.insert(PollerHandle::spawn(
            Arc::clone(&self.source),
            review_id,
            self.interval,
        ))
    }

    pub fn stop(&mut self) {
        if let Some(previous) = self.current.take() {
            tracing::debug!(review_id = %previous.review_id(), "stopping poller");
        }
    }

    #[must_use]
    pub fn current(&self) -> Option<&PollerHandle> {
        self.current.as_ref()
    }
}
