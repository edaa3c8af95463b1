//! Check orchestrator for coordinating the whole run
//!
//! This module provides:
//! - Workflow coordination: read → fetch → evaluate → rank
//! - Parallel proxy queries bounded by a semaphore
//! - Per-dependency error collection with partial continuation

use crate::config::RunConfig;
use crate::domain::{DeclaredDependency, Evaluation, RunSummary, Version};
use crate::engine::{ranked_entries, DependencyEvaluator, RankedEntry};
use crate::error::{AppError, FetchError, ManifestError};
use crate::manifest::{read_manifest, Manifest};
use crate::progress::Progress;
use crate::registry::{GoProxySource, HttpClient, VersionSource};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

/// What went wrong for a single dependency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunErrorKind {
    /// The version list could not be fetched
    Fetch,
    /// The required version could not be parsed
    Excluded,
}

/// A per-dependency problem that did not abort the run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunError {
    pub dependency: String,
    pub kind: RunErrorKind,
    pub message: String,
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            RunErrorKind::Fetch => {
                write!(f, "failed to fetch {}: {}", self.dependency, self.message)
            }
            RunErrorKind::Excluded => write!(f, "excluded {}: {}", self.dependency, self.message),
        }
    }
}

/// Result of one run
#[derive(Debug, Clone, Default)]
pub struct RunResult {
    /// Module path declared by the manifest
    pub module: Option<String>,
    /// Outdated dependencies in display order
    pub entries: Vec<RankedEntry>,
    /// Every evaluation in declaration order
    pub evaluations: Vec<Evaluation>,
    /// Summary statistics
    pub summary: RunSummary,
    /// Per-dependency problems
    pub errors: Vec<RunError>,
}

impl RunResult {
    /// Whether any version list could not be fetched
    pub fn has_fetch_failures(&self) -> bool {
        self.errors.iter().any(|e| e.kind == RunErrorKind::Fetch)
    }
}

/// Orchestrator for coordinating the check workflow
pub struct Orchestrator {
    config: RunConfig,
    source: Arc<dyn VersionSource>,
    evaluator: DependencyEvaluator,
    semaphore: Arc<Semaphore>,
}

impl Orchestrator {
    /// Create an orchestrator that queries the Go module proxy
    pub fn new(config: RunConfig) -> Result<Self, FetchError> {
        let client = HttpClient::new()?;
        let source = GoProxySource::new(client);
        info!(proxy = source.base_url(), "using module proxy");
        Ok(Self::with_source(config, Arc::new(source)))
    }

    /// Create an orchestrator with a custom version source
    pub fn with_source(config: RunConfig, source: Arc<dyn VersionSource>) -> Self {
        let evaluator = DependencyEvaluator::new(config.filter.clone());
        let semaphore = Arc::new(Semaphore::new(config.concurrency.max(1)));
        Self {
            config,
            source,
            evaluator,
            semaphore,
        }
    }

    /// Run the workflow
    pub async fn run(&self) -> Result<RunResult, ManifestError> {
        self.run_with_progress(self.config.output.shows_progress())
            .await
    }

    /// Run the workflow with optional progress display
    pub async fn run_with_progress(&self, show_progress: bool) -> Result<RunResult, ManifestError> {
        let mut progress = Progress::new(show_progress);

        progress.spinner("Reading go.mod...");
        let manifest = read_manifest(&self.config.manifest_path);
        progress.finish_and_clear();

        let manifest = manifest?;
        Ok(self.check_manifest(&manifest, &mut progress).await)
    }

    /// Check every selected requirement of an already parsed manifest
    pub async fn check_manifest(&self, manifest: &Manifest, progress: &mut Progress) -> RunResult {
        let dependencies = manifest.selected(self.config.include_indirect);
        debug!(
            total = manifest.dependencies.len(),
            selected = dependencies.len(),
            "requirements selected"
        );

        progress.start(dependencies.len() as u64, "Checking dependencies");
        let fetched = self.fetch_all(&dependencies, progress).await;
        progress.finish_and_clear();

        let mut evaluations = Vec::with_capacity(dependencies.len());
        let mut errors = Vec::new();
        let mut fetch_failures = 0;

        for (dependency, outcome) in dependencies.iter().zip(fetched) {
            let candidates = match outcome {
                Fetch::Skipped => Vec::new(),
                Fetch::Done(Ok(versions)) => versions,
                Fetch::Done(Err(message)) => {
                    warn!(dependency = %dependency.name, %message, "fetch failed");
                    fetch_failures += 1;
                    errors.push(RunError {
                        dependency: dependency.name.clone(),
                        kind: RunErrorKind::Fetch,
                        message,
                    });
                    Vec::new()
                }
            };

            let evaluation = self.evaluator.evaluate_dependency(dependency, &candidates);
            if let Evaluation::Excluded { name, error } = &evaluation {
                errors.push(RunError {
                    dependency: name.clone(),
                    kind: RunErrorKind::Excluded,
                    message: error.to_string(),
                });
            }
            evaluations.push(evaluation);
        }

        let summary = RunSummary::from_evaluations(&evaluations, fetch_failures);
        let entries = ranked_entries(evaluations.iter().filter_map(|e| e.report().cloned()));

        RunResult {
            module: manifest.module.clone(),
            entries,
            evaluations,
            summary,
            errors,
        }
    }

    /// Fetch version lists concurrently, one task per dependency
    ///
    /// Results come back in the same order as `dependencies`.
    async fn fetch_all(
        &self,
        dependencies: &[DeclaredDependency],
        progress: &Progress,
    ) -> Vec<Fetch> {
        let mut handles = Vec::with_capacity(dependencies.len());

        for dependency in dependencies {
            // No point asking the proxy about a requirement that will be excluded
            if Version::parse(&dependency.version).is_err() {
                progress.inc();
                handles.push(None);
                continue;
            }

            let source = Arc::clone(&self.source);
            let semaphore = Arc::clone(&self.semaphore);
            let bar = progress.handle();
            let name = dependency.name.clone();

            handles.push(Some(tokio::spawn(async move {
                let _permit = semaphore.acquire_owned().await.ok();
                let result = source
                    .fetch_versions(&name)
                    .await
                    .map_err(|e| e.to_string());
                if let Some(bar) = bar {
                    bar.inc(1);
                }
                result
            })));
        }

        let mut results = Vec::with_capacity(handles.len());
        for handle in handles {
            let outcome = match handle {
                None => Fetch::Skipped,
                Some(handle) => match handle.await {
                    Ok(result) => Fetch::Done(result),
                    Err(e) => Fetch::Done(Err(format!("fetch task failed: {}", e))),
                },
            };
            results.push(outcome);
        }
        results
    }
}

/// Check the configured go.mod against the module proxy
pub async fn check(config: RunConfig) -> Result<RunResult, AppError> {
    let orchestrator = Orchestrator::new(config)?;
    Ok(orchestrator.run().await?)
}

/// Outcome of the fetch step for one dependency
enum Fetch {
    Skipped,
    Done(Result<Vec<String>, String>),
}
