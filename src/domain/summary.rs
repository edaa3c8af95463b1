//! Run summary statistics
//!
//! Tier counts are computed over the unfiltered classification so the
//! summary reflects what is really available, not what the filter shows.

use super::{Evaluation, SeverityTier};
use serde::Serialize;

/// Counts collected over one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Dependencies read from the manifest and evaluated
    pub checked: usize,
    /// Dependencies with at least one retained newer version
    pub outdated: usize,
    /// Dependencies with nothing to show
    pub current: usize,
    /// Dependencies whose required version could not be parsed
    pub excluded: usize,
    /// Dependencies whose version list could not be fetched
    pub fetch_failures: usize,
    /// Dependencies whose worst available upgrade is a patch
    pub patch: usize,
    /// Dependencies whose worst available upgrade is a minor
    pub minor: usize,
    /// Dependencies whose worst available upgrade is a major
    pub major: usize,
    /// Dependencies with an incompatible upgrade available
    pub incompatible: usize,
}

impl RunSummary {
    /// Creates an empty summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a summary from evaluations
    pub fn from_evaluations(evaluations: &[Evaluation], fetch_failures: usize) -> Self {
        let mut summary = Self {
            fetch_failures,
            ..Self::default()
        };
        for evaluation in evaluations {
            summary.record(evaluation);
        }
        summary
    }

    /// Adds one evaluation to the counts
    pub fn record(&mut self, evaluation: &Evaluation) {
        self.checked += 1;

        let Some(report) = evaluation.report() else {
            self.excluded += 1;
            return;
        };

        if report.is_outdated() {
            self.outdated += 1;
        } else {
            self.current += 1;
        }

        match report.unfiltered_worst_severity() {
            Some(SeverityTier::Patch) => self.patch += 1,
            Some(SeverityTier::Minor) => self.minor += 1,
            Some(SeverityTier::Major) => self.major += 1,
            Some(SeverityTier::Incompatible) => self.incompatible += 1,
            None => {}
        }
    }

    /// Count of dependencies whose worst available upgrade is `tier`
    pub fn count_for(&self, tier: SeverityTier) -> usize {
        match tier {
            SeverityTier::Patch => self.patch,
            SeverityTier::Minor => self.minor,
            SeverityTier::Major => self.major,
            SeverityTier::Incompatible => self.incompatible,
        }
    }
}
