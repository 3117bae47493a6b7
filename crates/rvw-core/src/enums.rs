//! Status enums for reviews, checks, rule templates, and chat.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// ReviewStatus
// ---------------------------------------------------------------------------

/// Status of a review through the server-side pipeline.
///
/// ```text
/// pending → processing → completed
///                      → failed
/// ```
///
/// `pending` and `processing` are rendered identically by clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl ReviewStatus {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Processing, Self::Failed],
            Self::Processing => &[Self::Completed, Self::Failed],
            Self::Completed | Self::Failed => &[],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    /// Terminal states end polling.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// CheckStatus
// ---------------------------------------------------------------------------

/// Outcome of a single checklist item, document, or cross-validation check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Pass,
    Warning,
    Fail,
}

impl CheckStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Warning => "warning",
            Self::Fail => "fail",
        }
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RuleMode
// ---------------------------------------------------------------------------

/// Whether a template's rules extend or override the server defaults.
///
/// The client never interprets the mode; it only displays and edits it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleMode {
    #[default]
    Supplement,
    Replace,
}

impl RuleMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Supplement => "supplement",
            Self::Replace => "replace",
        }
    }

    /// Deserialize a mode leniently: anything other than `"replace"`
    /// (including a missing or null value) reads as [`RuleMode::Supplement`].
    ///
    /// # Errors
    ///
    /// Only fails when the underlying deserializer fails outright.
    pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(match raw.as_ref().and_then(serde_json::Value::as_str) {
            Some("replace") => Self::Replace,
            _ => Self::Supplement,
        })
    }
}

impl fmt::Display for RuleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ChatRole
// ---------------------------------------------------------------------------

/// Author of a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl fmt::Display for ChatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn review_status_terminal_states() {
        assert!(!ReviewStatus::Pending.is_terminal());
        assert!(!ReviewStatus::Processing.is_terminal());
        assert!(ReviewStatus::Completed.is_terminal());
        assert!(ReviewStatus::Failed.is_terminal());
    }

    #[test]
    fn review_status_transitions() {
        assert!(ReviewStatus::Pending.can_transition_to(ReviewStatus::Processing));
        assert!(ReviewStatus::Processing.can_transition_to(ReviewStatus::Completed));
        assert!(!ReviewStatus::Completed.can_transition_to(ReviewStatus::Processing));
        assert!(ReviewStatus::Failed.allowed_next_states().is_empty());
    }

    #[test]
    fn review_status_serializes_snake_case() {
        let json = serde_json::to_string(&ReviewStatus::Processing).unwrap();
        assert_eq!(json, "\"processing\"");
        let parsed: ReviewStatus = serde_json::from_str("\"completed\"").unwrap();
        assert_eq!(parsed, ReviewStatus::Completed);
    }

    #[test]
    fn rule_mode_lenient_fallback() {
        #[derive(Deserialize)]
        struct Holder {
            #[serde(default, deserialize_with = "RuleMode::deserialize_lenient")]
            mode: RuleMode,
        }

        let replace: Holder = serde_json::from_str(r#"{"mode":"replace"}"#).unwrap();
        assert_eq!(replace.mode, RuleMode::Replace);
        let unknown: Holder = serde_json::from_str(r#"{"mode":"merge"}"#).unwrap();
        assert_eq!(unknown.mode, RuleMode::Supplement);
        let null: Holder = serde_json::from_str(r#"{"mode":null}"#).unwrap();
        assert_eq!(null.mode, RuleMode::Supplement);
        let missing: Holder = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.mode, RuleMode::Supplement);
    }
}
