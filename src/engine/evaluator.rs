//! Per-dependency evaluation
//!
//! Combines a declared baseline with its fetched candidates. The filter is
//! applied after classification, so reports keep the full classified list.

use super::{Classifier, TierFilter};
use crate::domain::{DeclaredDependency, DependencyReport, Evaluation, Version};
use tracing::{debug, warn};

/// Evaluates dependencies against their published versions
pub struct DependencyEvaluator {
    classifier: Classifier,
    filter: TierFilter,
}

impl DependencyEvaluator {
    /// Create an evaluator with the default classifier
    pub fn new(filter: TierFilter) -> Self {
        Self::with_classifier(Classifier::new(), filter)
    }

    /// Create an evaluator with a custom classifier
    pub fn with_classifier(classifier: Classifier, filter: TierFilter) -> Self {
        Self { classifier, filter }
    }

    /// Evaluate one dependency
    ///
    /// An unparseable baseline excludes the dependency instead of failing.
    pub fn evaluate<I, S>(&self, name: &str, baseline_raw: &str, raw_candidates: I) -> Evaluation
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let baseline = match Version::parse(baseline_raw) {
            Ok(v) => v,
            Err(error) => {
                warn!(dependency = name, %error, "excluding dependency");
                return Evaluation::Excluded {
                    name: name.to_string(),
                    error,
                };
            }
        };

        let classified = self.classifier.classify(&baseline, raw_candidates);
        let candidates = self.filter.apply(&classified);

        debug!(
            dependency = name,
            newer = classified.len(),
            shown = candidates.len(),
            "classified"
        );

        Evaluation::Report(DependencyReport::new(name, baseline, classified, candidates))
    }

    /// Evaluate a declared dependency
    pub fn evaluate_dependency<I, S>(
        &self,
        dependency: &DeclaredDependency,
        raw_candidates: I,
    ) -> Evaluation
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.evaluate(&dependency.name, &dependency.version, raw_candidates)
    }
}

impl Default for DependencyEvaluator {
    fn default() -> Self {
        Self::new(TierFilter::default())
    }
}
