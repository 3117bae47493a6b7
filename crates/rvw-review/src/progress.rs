//! Stage-by-stage progress for an in-flight review.

use std::fmt;

use rvw_core::entities::ReviewProgress;

/// Pipeline stages in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReviewPhase {
    Preprocess,
    Extraction,
    CrossValidation,
}

impl ReviewPhase {
    pub const ALL: [Self; 3] = [Self::Preprocess, Self::Extraction, Self::CrossValidation];

    /// Parse a wire phase such as `phase2_extraction` by its leading
    /// `phaseN` token. Unknown phases yield `None`.
    #[must_use]
    pub fn parse(wire: &str) -> Option<Self> {
        match wire.split('_').next()? {
            "phase1" => Some(Self::Preprocess),
            "phase2" => Some(Self::Extraction),
            "phase3" => Some(Self::CrossValidation),
            _ => None,
        }
    }

    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::Preprocess => "phase1_preprocess",
            Self::Extraction => "phase2_extraction",
            Self::CrossValidation => "phase3_cross_validation",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Preprocess => "Preprocessing documents",
            Self::Extraction => "Extracting and checking documents",
            Self::CrossValidation => "Cross-validating documents",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageStatus {
    Done,
    Active,
    Pending,
}

impl StageStatus {
    const fn marker(self) -> &'static str {
        match self {
            Self::Done => "[x]",
            Self::Active => "[>]",
            Self::Pending => "[ ]",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    pub phase: ReviewPhase,
    pub status: StageStatus,
    /// `(completed, total)` document groups, only on the active stage.
    pub groups: Option<(u32, u32)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressView {
    pub stages: Vec<Stage>,
    pub detail: Option<String>,
    pub file_count: Option<u32>,
}

impl ProgressView {
    #[must_use]
    pub fn new(progress: &ReviewProgress, file_count: Option<u32>) -> Self {
        let current = ReviewPhase::parse(&progress.phase);
        let stages = ReviewPhase::ALL
            .into_iter()
            .map(|phase| {
                let status = match current {
                    Some(current) if phase < current => StageStatus::Done,
                    Some(current) if phase == current => StageStatus::Active,
                    _ => StageStatus::Pending,
                };
                let groups = (status == StageStatus::Active && progress.total_groups > 0)
                    .then_some((progress.completed_groups, progress.total_groups));
                Stage {
                    phase,
                    status,
                    groups,
                }
            })
            .collect();

        Self {
            stages,
            detail: Some(progress.detail.clone()).filter(|d| !d.is_empty()),
            file_count,
        }
    }

    #[must_use]
    pub fn active(&self) -> Option<&Stage> {
        self.stages.iter().find(|s| s.status == StageStatus::Active)
    }
}

impl fmt::Display for ProgressView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.file_count {
            Some(count) => writeln!(f, "Reviewing {count} documents...")?,
            None => writeln!(f, "Reviewing documents...")?,
        }
        for stage in &self.stages {
            write!(f, "  {} {}", stage.status.marker(), stage.phase.label())?;
            if let Some((done, total)) = stage.groups {
                write!(f, " ({done}/{total})")?;
            }
            writeln!(f)?;
        }
        if let Some(detail) = &self.detail {
            writeln!(f, "  {detail}")?;
        }
        Ok(())
    }
}
