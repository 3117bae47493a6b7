use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::enums::{CheckStatus, ReviewStatus};
use crate::errors::CoreError;
use crate::timestamp::Timestamp;

/// Pipeline progress reported while a review is pending or processing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReviewProgress {
    /// Wire phase name, e.g. `phase2_extraction`.
    pub phase: String,
    #[serde(default)]
    pub detail: String,
    #[serde(default)]
    pub completed_groups: u32,
    #[serde(default)]
    pub total_groups: u32,
}

impl Default for ReviewProgress {
    /// Progress shown before the server has reported any.
    fn default() -> Self {
        Self {
            phase: "phase1_preprocess".to_string(),
            detail: String::new(),
            completed_groups: 0,
            total_groups: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChecklistItem {
    pub item: String,
    pub status: CheckStatus,
    #[serde(default)]
    pub detail: String,
    /// Additional per-item fields the pipeline may attach.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentResult {
    pub doc_type: String,
    pub filename: String,
    #[serde(default)]
    pub extracted_data: Map<String, Value>,
    #[serde(default)]
    pub checklist: Vec<ChecklistItem>,
    pub status: CheckStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CrossValidationItem {
    pub check_type: String,
    pub description: String,
    pub status: CheckStatus,
    #[serde(default)]
    pub details: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReviewSummary {
    pub total_docs: u32,
    pub passed: u32,
    pub warnings: u32,
    pub failures: u32,
    #[serde(default)]
    pub critical_issues: Vec<String>,
    #[serde(default)]
    pub action_required: Vec<String>,
    #[serde(default)]
    pub opinion: String,
}

/// Final output of a completed review.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReviewResult {
    #[serde(default)]
    pub meta: Map<String, Value>,
    #[serde(default)]
    pub documents: Vec<DocumentResult>,
    #[serde(default)]
    pub cross_validation: Vec<CrossValidationItem>,
    pub summary: ReviewSummary,
}

/// Token and cost accounting for a review or chat turn.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Usage {
    pub total_input_tokens: u64,
    pub total_output_tokens: u64,
    pub estimated_cost_usd: f64,
    pub duration_seconds: f64,
}

impl Usage {
    /// `$0.123` style cost label.
    #[must_use]
    pub fn cost_label(&self) -> String {
        format!("${:.3}", self.estimated_cost_usd)
    }

    /// Duration rounded to whole seconds.
    #[must_use]
    pub fn duration_label(&self) -> String {
        format!("{}s", self.duration_seconds.round())
    }
}

/// Status snapshot of one review, as returned by `GET /api/reviews/{id}`.
///
/// The server owns this record; the client only ever replaces its copy
/// wholesale with a newer snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    pub review_id: String,
    pub status: ReviewStatus,
    #[serde(default)]
    pub progress: Option<ReviewProgress>,
    #[serde(default)]
    pub result: Option<ReviewResult>,
    #[serde(default)]
    pub usage: Option<Usage>,
    #[serde(default)]
    pub error: Option<String>,
}

impl Review {
    /// The result, only when the review has completed.
    #[must_use]
    pub fn completed_result(&self) -> Option<&ReviewResult> {
        match self.status {
            ReviewStatus::Completed => self.result.as_ref(),
            _ => None,
        }
    }

    /// The pipeline's failure message, only when the review has failed.
    #[must_use]
    pub fn failure(&self) -> Option<&str> {
        match self.status {
            ReviewStatus::Failed => Some(self.error.as_deref().unwrap_or_default()),
            _ => None,
        }
    }

    /// Progress for a review still in flight, defaulting to the first phase.
    #[must_use]
    pub fn active_progress(&self) -> Option<ReviewProgress> {
        match self.status {
            ReviewStatus::Pending | ReviewStatus::Processing => {
                Some(self.progress.clone().unwrap_or_default())
            }
            _ => None,
        }
    }

    /// Require a completed review with a result.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnexpectedStatus`] if the review is not completed
    /// and [`CoreError::NotFound`] if a completed review carries no result.
    pub fn require_result(&self) -> Result<&ReviewResult, CoreError> {
        if self.status != ReviewStatus::Completed {
            return Err(CoreError::UnexpectedStatus {
                id: self.review_id.clone(),
                actual: self.status.to_string(),
                expected: ReviewStatus::Completed.to_string(),
            });
        }
        self.result.as_ref().ok_or_else(|| CoreError::NotFound {
            entity_type: "review result".to_string(),
            id: self.review_id.clone(),
        })
    }

    /// First 8 characters of the id, as shown in listings.
    #[must_use]
    pub fn short_id(&self) -> &str {
        self.review_id
            .char_indices()
            .nth(8)
            .map_or(self.review_id.as_str(), |(idx, _)| &self.review_id[..idx])
    }
}

/// Response of `POST /api/reviews/{id}/start`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReviewStarted {
    pub review_id: String,
    pub status: ReviewStatus,
    #[serde(default)]
    pub file_count: u32,
    #[serde(default)]
    pub created_at: Timestamp,
    #[serde(default)]
    pub estimated_seconds: u64,
}

/// One page of `GET /api/reviews`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReviewPage {
    pub reviews: Vec<Review>,
    pub total: u64,
}
