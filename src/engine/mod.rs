//! Version resolution and classification engine
//!
//! This module provides:
//! - Classification of newer versions into severity tiers
//! - Severity filter configuration
//! - Per-dependency evaluation
//! - Display ranking of outdated dependencies
//!
//! Everything here is pure: no I/O and no shared state.

mod classifier;
mod evaluator;
mod filter;
mod ranker;

pub use classifier::{
    classify, numeric_bump, Classifier, GoModuleRule, IncompatibleRule, MajorEpochRule,
};
pub use evaluator::DependencyEvaluator;
pub use filter::TierFilter;
pub use ranker::{rank, ranked_entries, RankedEntry, RankedVersion};
