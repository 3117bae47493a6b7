//! Screen model for one review snapshot.

use std::fmt;
use std::path::{Path, PathBuf};

use rvw_core::entities::{Review, ReviewResult, Usage};
use rvw_core::enums::{CheckStatus, ReviewStatus};
use serde_json::Value;

use crate::error::ExportError;
use crate::progress::ProgressView;

/// What to show for the current poll state.
#[derive(Debug, Clone, PartialEq)]
pub enum ReviewScreen<'a> {
    Loading,
    /// `pending` and `processing` look the same.
    Progress(ProgressView),
    /// The pipeline gave up; the way forward is a new review.
    Failed { error: &'a str },
    Completed(ResultView<'a>),
    /// Fetching the status failed; polling has stopped.
    FetchError(&'a str),
    /// A completed snapshot without a result renders nothing.
    Blank,
}

impl<'a> ReviewScreen<'a> {
    #[must_use]
    pub fn for_review(review: &'a Review) -> Self {
        match review.status {
            ReviewStatus::Pending | ReviewStatus::Processing => {
                let file_count = review.result.as_ref().map(|r| r.summary.total_docs);
                Self::Progress(ProgressView::new(
                    &review.progress.clone().unwrap_or_default(),
                    file_count,
                ))
            }
            ReviewStatus::Failed => Self::Failed {
                error: review.error.as_deref().unwrap_or_default(),
            },
            ReviewStatus::Completed => review
                .completed_result()
                .map_or(Self::Blank, |result| Self::Completed(ResultView::new(review, result))),
        }
    }

    /// Follow-up command offered alongside the screen.
    #[must_use]
    pub const fn next_step(&self) -> Option<&'static str> {
        match self {
            Self::Failed { .. } | Self::Completed(_) => Some("rvw review new"),
            Self::FetchError(_) => Some("rvw review list"),
            Self::Loading | Self::Progress(_) | Self::Blank => None,
        }
    }
}

impl fmt::Display for ReviewScreen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loading => writeln!(f, "Loading...")?,
            Self::Progress(progress) => write!(f, "{progress}")?,
            Self::Failed { error } => {
                writeln!(f, "Review failed")?;
                if !error.is_empty() {
                    writeln!(f, "  {error}")?;
                }
            }
            Self::Completed(result) => write!(f, "{result}")?,
            Self::FetchError(message) => writeln!(f, "Error: {message}")?,
            Self::Blank => {}
        }
        if let Some(step) = self.next_step() {
            writeln!(f, "\nNext: {step}")?;
        }
        Ok(())
    }
}

/// A completed review's result with its usage, ready to print or export.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultView<'a> {
    pub review_id: &'a str,
    pub result: &'a ReviewResult,
    pub usage: Option<&'a Usage>,
}

impl<'a> ResultView<'a> {
    fn new(review: &'a Review, result: &'a ReviewResult) -> Self {
        Self {
            review_id: &review.review_id,
            result,
            usage: review.usage.as_ref(),
        }
    }

    /// Only completed reviews with a result can be viewed.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::NotExportable`] for any other snapshot.
    pub fn of(review: &'a Review) -> Result<Self, ExportError> {
        let result = review.require_result()?;
        Ok(Self::new(review, result))
    }

    /// `review-<first 8 chars of id>.json`
    #[must_use]
    pub fn export_file_name(&self) -> String {
        let short: String = self.review_id.chars().take(8).collect();
        format!("review-{short}.json")
    }

    /// # Errors
    ///
    /// Returns [`ExportError::Json`] if the result cannot be serialized.
    pub fn export_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self.result)?)
    }

    /// Write the pretty JSON export into `dir`, returning the file path.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Io`] if the file cannot be written.
    pub fn write_export(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        let path = dir.join(self.export_file_name());
        std::fs::write(&path, self.export_json()?).map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

const fn marker(status: CheckStatus) -> &'static str {
    match status {
        CheckStatus::Pass => "PASS",
        CheckStatus::Warning => "WARN",
        CheckStatus::Fail => "FAIL",
    }
}

fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl fmt::Display for ResultView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = &self.result.summary;
        writeln!(f, "Review completed")?;
        writeln!(
            f,
            "  passed: {}  warnings: {}  failures: {}",
            summary.passed, summary.warnings, summary.failures
        )?;
        if !summary.opinion.is_empty() {
            writeln!(f, "\n{}", summary.opinion)?;
        }
        for issue in &summary.critical_issues {
            writeln!(f, "  ! {issue}")?;
        }
        for action in &summary.action_required {
            writeln!(f, "  > {action}")?;
        }

        if !self.result.documents.is_empty() {
            writeln!(f, "\nDocuments")?;
        }
        for doc in &self.result.documents {
            writeln!(f, "  [{}] {} ({})", marker(doc.status), doc.doc_type, doc.filename)?;
            for (key, value) in &doc.extracted_data {
                writeln!(f, "      {key}: {}", plain(value))?;
            }
            for item in &doc.checklist {
                write!(f, "      [{}] {}", marker(item.status), item.item)?;
                if !item.detail.is_empty() {
                    write!(f, ": {}", item.detail)?;
                }
                writeln!(f)?;
            }
        }

        if !self.result.cross_validation.is_empty() {
            writeln!(f, "\nCross-validation")?;
        }
        for item in &self.result.cross_validation {
            writeln!(f, "  [{}] {}", marker(item.status), item.description)?;
            if !item.details.is_empty() {
                writeln!(f, "      {}", item.details)?;
            }
        }

        if let Some(usage) = self.usage {
            writeln!(f, "\nCost {}  Time {}", usage.cost_label(), usage.duration_label())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rvw_core::entities::{ReviewProgress, ReviewSummary};
    use serde_json::Map;

    fn review(status: ReviewStatus, with_result: bool) -> Review {
        Review {
            review_id: "7a1d0c55-1111-4c3b-a2d4-0f2e3d4c5b6a".into(),
            status,
            progress: None,
            result: with_result.then(|| ReviewResult {
                meta: Map::new(),
                documents: Vec::new(),
                cross_validation: Vec::new(),
                summary: ReviewSummary {
                    total_docs: 2,
                    passed: 1,
                    warnings: 0,
                    failures: 1,
                    critical_issues: vec!["Tax id invalid".into()],
                    action_required: Vec::new(),
                    opinion: "Do not approve.".into(),
                },
            }),
            usage: Some(Usage {
                total_input_tokens: 10,
                total_output_tokens: 5,
                estimated_cost_usd: 0.0213,
                duration_seconds: 37.4,
            }),
            error: Some("no text found".into()),
        }
    }

    #[test]
    fn in_flight_review_shows_default_progress() {
        let r = review(ReviewStatus::Pending, false);
        let ReviewScreen::Progress(view) = ReviewScreen::for_review(&r) else {
            panic!("expected progress");
        };
        assert_eq!(view, ProgressView::new(&ReviewProgress::default(), None));
    }

    #[test]
    fn processing_review_never_shows_result() {
        let r = review(ReviewStatus::Processing, true);
        assert!(matches!(ReviewScreen::for_review(&r), ReviewScreen::Progress(_)));
    }

    #[test]
    fn failed_review_offers_new_review() {
        let r = review(ReviewStatus::Failed, false);
        let screen = ReviewScreen::for_review(&r);
        assert_eq!(screen, ReviewScreen::Failed { error: "no text found" });
        assert_eq!(screen.next_step(), Some("rvw review new"));
    }

    #[test]
    fn completed_without_result_is_blank() {
        let r = review(ReviewStatus::Completed, false);
        assert_eq!(ReviewScreen::for_review(&r), ReviewScreen::Blank);
        assert!(ResultView::of(&r).is_err());
    }

    #[test]
    fn completed_result_renders_summary_and_usage() {
        let r = review(ReviewStatus::Completed, true);
        let text = ReviewScreen::for_review(&r).to_string();
        assert!(text.contains("passed: 1  warnings: 0  failures: 1"));
        assert!(text.contains("  ! Tax id invalid"));
        assert!(text.contains("Cost $0.021  Time 37s"));
    }

    #[test]
    fn export_writes_pretty_json_named_by_short_id() {
        let r = review(ReviewStatus::Completed, true);
        let view = ResultView::of(&r).unwrap();
        assert_eq!(view.export_file_name(), "review-7a1d0c55.json");

        let dir = tempfile::TempDir::new().unwrap();
        let path = view.write_export(dir.path()).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("{\n  \"meta\""));
        let back: ReviewResult = serde_json::from_str(&written).unwrap();
        assert_eq!(&back, r.result.as_ref().unwrap());
    }
}
