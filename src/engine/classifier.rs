//! Candidate classification
//!
//! Turns a baseline and a raw set of published version strings into the
//! ascending, deduplicated list of newer versions tagged with a severity tier.

use crate::domain::{ClassifiedVersion, SeverityTier, Version};
use std::collections::BTreeSet;
use tracing::trace;

/// Decides whether a candidate crosses a breaking-API boundary
pub trait IncompatibleRule: Send + Sync {
    fn is_incompatible(&self, candidate: &Version, baseline: &Version) -> bool;
}

impl<F> IncompatibleRule for F
where
    F: Fn(&Version, &Version) -> bool + Send + Sync,
{
    fn is_incompatible(&self, candidate: &Version, baseline: &Version) -> bool {
        self(candidate, baseline)
    }
}

/// Go module convention: v2+ releases published without a `/vN` module path
/// carry `+incompatible`. Moving within the baseline's own incompatible
/// major is not a boundary.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoModuleRule;

impl IncompatibleRule for GoModuleRule {
    fn is_incompatible(&self, candidate: &Version, baseline: &Version) -> bool {
        if !candidate.is_incompatible() {
            return false;
        }
        !(baseline.is_incompatible() && baseline.major() == candidate.major())
    }
}

/// Treats every major bump as incompatible
#[derive(Debug, Clone, Copy, Default)]
pub struct MajorEpochRule;

impl IncompatibleRule for MajorEpochRule {
    fn is_incompatible(&self, candidate: &Version, baseline: &Version) -> bool {
        candidate.major() > baseline.major()
    }
}

/// Numeric bump of `candidate` over `baseline`, assuming `candidate > baseline`
pub fn numeric_bump(candidate: &Version, baseline: &Version) -> SeverityTier {
    if candidate.major() > baseline.major() {
        SeverityTier::Major
    } else if candidate.minor() > baseline.minor() {
        SeverityTier::Minor
    } else {
        SeverityTier::Patch
    }
}

/// Classifier with a pluggable incompatible rule
pub struct Classifier {
    rule: Box<dyn IncompatibleRule>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier {
    /// Create a classifier using the Go module convention
    pub fn new() -> Self {
        Self::with_rule(GoModuleRule)
    }

    /// Create a classifier with a custom incompatible rule
    pub fn with_rule(rule: impl IncompatibleRule + 'static) -> Self {
        Self {
            rule: Box::new(rule),
        }
    }

    /// Tier of a candidate already known to be newer than the baseline
    pub fn tier(&self, candidate: &Version, baseline: &Version) -> SeverityTier {
        if self.rule.is_incompatible(candidate, baseline) {
            SeverityTier::Incompatible
        } else {
            numeric_bump(candidate, baseline)
        }
    }

    /// Classify raw candidates against the baseline
    ///
    /// Unparseable candidates are dropped. Versions equal in precedence keep
    /// the first spelling seen.
    pub fn classify<I, S>(&self, baseline: &Version, raw_candidates: I) -> Vec<ClassifiedVersion>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut newer = BTreeSet::new();

        for raw in raw_candidates {
            let raw = raw.as_ref();
            match Version::parse(raw) {
                Ok(candidate) if candidate > *baseline => {
                    // BTreeSet::insert keeps the existing element on ties
                    newer.insert(candidate);
                }
                Ok(_) => {}
                Err(e) => trace!(candidate = raw, error = %e, "dropping unparseable candidate"),
            }
        }

        newer
            .into_iter()
            .map(|candidate| {
                let tier = self.tier(&candidate, baseline);
                let bump = numeric_bump(&candidate, baseline);
                ClassifiedVersion::new(candidate, tier, bump)
            })
            .collect()
    }
}

/// Classify with the default Go module rule
pub fn classify<I, S>(baseline: &Version, raw_candidates: I) -> Vec<ClassifiedVersion>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Classifier::new().classify(baseline, raw_candidates)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(raw: &str) -> Version {
        Version::parse(raw).unwrap()
    }

    fn originals(classified: &[ClassifiedVersion]) -> Vec<&str> {
        classified.iter().map(|c| c.version.original()).collect()
    }

    fn tiers(classified: &[ClassifiedVersion]) -> Vec<SeverityTier> {
        classified.iter().map(|c| c.tier).collect()
    }

    #[test]
    fn test_patch_minor_major() {
        let result = classify(&v("1.2.0"), ["1.2.1", "1.3.0", "2.0.0"]);
        assert_eq!(originals(&result), vec!["1.2.1", "1.3.0", "2.0.0"]);
        assert_eq!(
            tiers(&result),
            vec![SeverityTier::Patch, SeverityTier::Minor, SeverityTier::Major]
        );
    }

    #[test]
    fn test_not_greater_dropped() {
        let result = classify(&v("v1.0.0"), ["0.9.0", "1.0.0"]);
        assert!(result.is_empty());
    }

    #[test]
    fn test_incompatible_takes_precedence() {
        let result = classify(&v("v1.0.0"), ["v2.0.0+incompatible"]);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].tier, SeverityTier::Incompatible);
        assert_eq!(result[0].bump, SeverityTier::Major);
    }

    #[test]
    fn test_within_incompatible_major_is_numeric() {
        let result = classify(
            &v("v2.0.0+incompatible"),
            ["v2.1.0+incompatible", "v3.0.0+incompatible"],
        );
        assert_eq!(
            tiers(&result),
            vec![SeverityTier::Minor, SeverityTier::Incompatible]
        );
    }

    #[test]
    fn test_unparseable_candidates_dropped() {
        let result = classify(&v("v1.0.0"), ["garbage", "v1.0.1", "", "1.2"]);
        assert_eq!(originals(&result), vec!["v1.0.1"]);
    }

    #[test]
    fn test_sorted_ascending() {
        let result = classify(&v("v1.0.0"), ["v1.10.0", "v1.2.0", "v1.9.0", "v1.0.5"]);
        assert_eq!(
            originals(&result),
            vec!["v1.0.5", "v1.2.0", "v1.9.0", "v1.10.0"]
        );
    }

    #[test]
    fn test_dedup_keeps_first_spelling() {
        let result = classify(&v("v1.0.0"), ["1.1.0", "v1.1.0", "v1.1.0+build"]);
        assert_eq!(originals(&result), vec!["1.1.0"]);
    }

    #[test]
    fn test_prerelease_candidates() {
        let result = classify(&v("v1.0.0-rc.1"), ["v1.0.0-rc.2", "v1.0.0", "v1.0.0-beta"]);
        assert_eq!(originals(&result), vec!["v1.0.0-rc.2", "v1.0.0"]);
        assert_eq!(
            tiers(&result),
            vec![SeverityTier::Patch, SeverityTier::Patch]
        );
    }

    #[test]
    fn test_pseudo_version_baseline() {
        let result = classify(&v("v0.0.0-20210101120000-abcdef123456"), ["v0.1.0"]);
        assert_eq!(tiers(&result), vec![SeverityTier::Minor]);
    }

    #[test]
    fn test_formatting_does_not_change_tier() {
        let with_prefix = classify(&v("v1.2.3"), ["v1.3.0"]);
        let without_prefix = classify(&v("1.2.3"), ["1.3.0"]);
        assert_eq!(tiers(&with_prefix), tiers(&without_prefix));
    }

    #[test]
    fn test_idempotent() {
        let baseline = v("v1.2.0");
        let candidates = vec!["v1.2.1", "v2.0.0+incompatible", "v1.4.0", "junk"];
        let classifier = Classifier::new();
        let first = classifier.classify(&baseline, &candidates);
        let second = classifier.classify(&baseline, &candidates);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_candidates() {
        let result = classify(&v("v1.0.0"), Vec::<String>::new());
        assert!(result.is_empty());
    }

    #[test]
    fn test_major_epoch_rule() {
        let classifier = Classifier::with_rule(MajorEpochRule);
        let result = classifier.classify(&v("v1.0.0"), ["v1.1.0", "v2.0.0"]);
        assert_eq!(
            tiers(&result),
            vec![SeverityTier::Minor, SeverityTier::Incompatible]
        );
    }

    #[test]
    fn test_closure_rule() {
        let classifier =
            Classifier::with_rule(|candidate: &Version, _: &Version| candidate.major() >= 5);
        let result = classifier.classify(&v("v1.0.0"), ["v4.0.0", "v5.0.0"]);
        assert_eq!(
            tiers(&result),
            vec![SeverityTier::Major, SeverityTier::Incompatible]
        );
    }

    #[test]
    fn test_numeric_bump() {
        assert_eq!(numeric_bump(&v("1.2.4"), &v("1.2.3")), SeverityTier::Patch);
        assert_eq!(numeric_bump(&v("1.3.0"), &v("1.2.3")), SeverityTier::Minor);
        assert_eq!(numeric_bump(&v("2.0.0"), &v("1.2.3")), SeverityTier::Major);
    }
}
