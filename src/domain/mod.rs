//! Core domain models for modcheck
//!
//! This module contains the fundamental types used throughout the application:
//! - Comparable versions and severity tiers
//! - Declared dependency information from the manifest
//! - Per-dependency evaluation reports
//! - Run summary statistics

mod dependency;
mod report;
mod severity;
mod summary;
mod version;

pub use dependency::DeclaredDependency;
pub use report::{ClassifiedVersion, DependencyReport, DependencyStatus, Evaluation};
pub use severity::SeverityTier;
pub use summary::RunSummary;
pub use version::Version;
