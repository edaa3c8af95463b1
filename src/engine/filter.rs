//! Severity filter configuration
//!
//! This module provides the TierFilter struct that decides which classified
//! versions are shown. Filtering always runs after classification.

use crate::domain::{ClassifiedVersion, SeverityTier};
use std::collections::BTreeSet;

/// Filter applied to classified versions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierFilter {
    /// Numeric tiers to retain (Patch, Minor, Major)
    tiers: BTreeSet<SeverityTier>,
    /// Retain versions carrying the incompatible marker
    include_incompatible: bool,
}

impl Default for TierFilter {
    /// All three numeric tiers, incompatible versions hidden
    fn default() -> Self {
        Self {
            tiers: SeverityTier::selectable().iter().copied().collect(),
            include_incompatible: false,
        }
    }
}

impl TierFilter {
    /// Create a filter with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// A filter that retains everything
    pub fn unfiltered() -> Self {
        Self::default().with_include_incompatible(true)
    }

    /// Set the numeric tiers to retain; `Incompatible` is ignored here
    pub fn with_tiers(mut self, tiers: impl IntoIterator<Item = SeverityTier>) -> Self {
        self.tiers = tiers
            .into_iter()
            .filter(|t| *t != SeverityTier::Incompatible)
            .collect();
        self
    }

    /// Set whether incompatible versions are retained
    pub fn with_include_incompatible(mut self, include: bool) -> Self {
        self.include_incompatible = include;
        self
    }

    pub fn tiers(&self) -> &BTreeSet<SeverityTier> {
        &self.tiers
    }

    pub fn include_incompatible(&self) -> bool {
        self.include_incompatible
    }

    /// Check if a classified version should be shown
    ///
    /// Incompatible versions additionally need their numeric bump selected.
    pub fn retains(&self, version: &ClassifiedVersion) -> bool {
        match version.tier {
            SeverityTier::Incompatible => {
                self.include_incompatible && self.tiers.contains(&version.bump)
            }
            tier => self.tiers.contains(&tier),
        }
    }

    /// Keep the retained versions, preserving order
    pub fn apply(&self, versions: &[ClassifiedVersion]) -> Vec<ClassifiedVersion> {
        versions.iter().filter(|v| self.retains(v)).cloned().collect()
    }

    /// Comma-separated description for display (e.g., "major,minor,patch")
    pub fn describe(&self) -> String {
        let mut labels: Vec<&str> = self.tiers.iter().rev().map(|t| t.label()).collect();
        if self.include_incompatible {
            labels.push(SeverityTier::Incompatible.label());
        }
        labels.join(",")
    }
}
