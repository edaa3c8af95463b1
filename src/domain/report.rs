//! Per-dependency evaluation results

use super::{SeverityTier, Version};
use crate::error::VersionParseError;
use serde::Serialize;
use std::fmt;

/// A newer version tagged with its severity tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedVersion {
    /// The candidate version
    pub version: Version,
    /// Severity relative to the baseline
    pub tier: SeverityTier,
    /// Numeric bump relative to the baseline, ignoring the incompatible marker
    #[serde(skip)]
    pub bump: SeverityTier,
}

impl ClassifiedVersion {
    /// Creates a classified version
    pub fn new(version: Version, tier: SeverityTier, bump: SeverityTier) -> Self {
        Self {
            version,
            tier,
            bump,
        }
    }
}

/// Whether a dependency has newer versions to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyStatus {
    /// No retained candidate is newer than the baseline
    Current,
    /// At least one retained candidate is newer than the baseline
    Outdated,
}

impl fmt::Display for DependencyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DependencyStatus::Current => write!(f, "current"),
            DependencyStatus::Outdated => write!(f, "outdated"),
        }
    }
}

/// Classification outcome for one dependency
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyReport {
    /// Module path
    pub name: String,
    /// Version currently required
    pub baseline: Version,
    /// Every newer version, before filtering
    #[serde(skip)]
    pub classified: Vec<ClassifiedVersion>,
    /// Newer versions retained by the filter, ascending
    pub candidates: Vec<ClassifiedVersion>,
    /// `Current` iff `candidates` is empty
    pub status: DependencyStatus,
}

impl DependencyReport {
    /// Creates a report; the status follows from the retained candidates
    pub fn new(
        name: impl Into<String>,
        baseline: Version,
        classified: Vec<ClassifiedVersion>,
        candidates: Vec<ClassifiedVersion>,
    ) -> Self {
        let status = if candidates.is_empty() {
            DependencyStatus::Current
        } else {
            DependencyStatus::Outdated
        };

        Self {
            name: name.into(),
            baseline,
            classified,
            candidates,
            status,
        }
    }

    /// Creates a report with nothing newer (e.g., empty or failed fetch)
    pub fn current(name: impl Into<String>, baseline: Version) -> Self {
        Self::new(name, baseline, Vec::new(), Vec::new())
    }

    pub fn is_outdated(&self) -> bool {
        self.status == DependencyStatus::Outdated
    }

    /// Worst tier among the retained candidates
    pub fn worst_severity(&self) -> Option<SeverityTier> {
        self.candidates.iter().map(|c| c.tier).max()
    }

    /// Worst tier among all newer versions, ignoring the filter
    pub fn unfiltered_worst_severity(&self) -> Option<SeverityTier> {
        self.classified.iter().map(|c| c.tier).max()
    }
}

/// Terminal state of a dependency after evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evaluation {
    /// The baseline could be parsed and was classified
    Report(DependencyReport),
    /// The baseline version is unparseable; the dependency is left out
    Excluded {
        /// Module path
        name: String,
        /// Why the baseline was rejected
        error: VersionParseError,
    },
}

impl Evaluation {
    pub fn name(&self) -> &str {
        match self {
            Evaluation::Report(report) => &report.name,
            Evaluation::Excluded { name, .. } => name,
        }
    }

    /// Returns the report, if the dependency was not excluded
    pub fn report(&self) -> Option<&DependencyReport> {
        match self {
            Evaluation::Report(report) => Some(report),
            Evaluation::Excluded { .. } => None,
        }
    }

    pub fn into_report(self) -> Option<DependencyReport> {
        match self {
            Evaluation::Report(report) => Some(report),
            Evaluation::Excluded { .. } => None,
        }
    }

    pub fn is_excluded(&self) -> bool {
        matches!(self, Evaluation::Excluded { .. })
    }
}
