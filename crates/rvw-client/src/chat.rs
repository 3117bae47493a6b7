//! `/api/chat`, plus a history-keeping conversation helper.

use rvw_core::entities::{ChatMessage, ChatReply, ChatRequest};

use crate::{ApiClient, ApiError};

impl ApiClient {
    /// Send one chat turn with the prior conversation as context.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport or server failure.
    pub async fn chat(
        &self,
        message: &str,
        history: &[ChatMessage],
        review_id: Option<&str>,
    ) -> Result<ChatReply, ApiError> {
        let request = ChatRequest {
            message: message.to_string(),
            history: history.to_vec(),
            review_id: review_id.filter(|id| !id.is_empty()).map(str::to_string),
        };
        self.post("/api/chat", &request).await
    }
}

/// A conversation that accumulates history across turns.
///
/// A turn is recorded only after the backend replies, so a failed call
/// leaves the history unchanged and can simply be retried.
#[derive(Debug)]
pub struct ChatSession<'a> {
    client: &'a ApiClient,
    review_id: Option<String>,
    history: Vec<ChatMessage>,
}

impl<'a> ChatSession<'a> {
    #[must_use]
    pub const fn new(client: &'a ApiClient, review_id: Option<String>) -> Self {
        Self {
            client,
            review_id,
            history: Vec::new(),
        }
    }

    #[must_use]
    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] from the underlying chat call.
    pub async fn send(&mut self, message: &str) -> Result<ChatReply, ApiError> {
        let reply = self
            .client
            .chat(message, &self.history, self.review_id.as_deref())
            .await?;
        self.history.push(ChatMessage::user(message));
        self.history.push(ChatMessage::assistant(reply.reply.clone()));
        Ok(reply)
    }
}
