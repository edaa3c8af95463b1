//! Display ordering of outdated dependencies
//!
//! Worst severity first, then dependency name ascending. The order depends
//! only on report contents, never on input order.

use crate::domain::{DependencyReport, SeverityTier};
use serde::Serialize;
use std::cmp::Ordering;

/// One classified version as handed to a presenter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedVersion {
    pub version: String,
    pub severity: SeverityTier,
}

/// A ranked row ready for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedEntry {
    /// 1-based display position
    pub rank: usize,
    pub name: String,
    pub current_version: String,
    /// Retained versions, ascending
    pub versions: Vec<RankedVersion>,
}

impl RankedEntry {
    /// Worst severity among the entry's versions
    pub fn worst_severity(&self) -> Option<SeverityTier> {
        self.versions.iter().map(|v| v.severity).max()
    }
}

fn display_order(a: &DependencyReport, b: &DependencyReport) -> Ordering {
    b.worst_severity()
        .cmp(&a.worst_severity())
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.baseline.cmp(&b.baseline))
        .then_with(|| a.baseline.original().cmp(b.baseline.original()))
}

/// Drop current reports and order the rest for display
pub fn rank(reports: impl IntoIterator<Item = DependencyReport>) -> Vec<DependencyReport> {
    let mut outdated: Vec<DependencyReport> =
        reports.into_iter().filter(|r| r.is_outdated()).collect();
    outdated.sort_by(display_order);
    outdated
}

/// Rank reports and attach 1-based positions
pub fn ranked_entries(reports: impl IntoIterator<Item = DependencyReport>) -> Vec<RankedEntry> {
    rank(reports)
        .into_iter()
        .enumerate()
        .map(|(index, report)| RankedEntry {
            rank: index + 1,
            current_version: report.baseline.original().to_string(),
            versions: report
                .candidates
                .iter()
                .map(|c| RankedVersion {
                    version: c.version.original().to_string(),
                    severity: c.tier,
                })
                .collect(),
            name: report.name,
        })
        .collect()
}
