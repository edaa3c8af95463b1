//! Error types for modcheck
//!
//! - VersionParseError: a version string outside the accepted grammar
//! - ManifestError: go.mod missing, unreadable or malformed; aborts the run
//! - FetchError: one module's version list could not be obtained; recorded per dependency
//! - ConfigError: rejected command-line values, reported before any I/O

use std::path::PathBuf;
use thiserror::Error;

/// Anything that stops a run before results can be presented
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid version '{raw}': {message}")]
pub struct VersionParseError {
    pub raw: String,
    pub message: String,
}

impl VersionParseError {
    pub fn new(raw: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("go.mod not found at {path}")]
    Missing { path: PathBuf },

    #[error("cannot read {path}: {cause}")]
    Unreadable {
        path: PathBuf,
        #[source]
        cause: std::io::Error,
    },

    /// Malformed go.mod; `line` is 1-based
    #[error("{path}: line {line}: {message}")]
    Syntax {
        path: PathBuf,
        line: usize,
        message: String,
    },
}

impl ManifestError {
    pub fn missing(path: impl Into<PathBuf>) -> Self {
        Self::Missing { path: path.into() }
    }

    pub fn unreadable(path: impl Into<PathBuf>, cause: std::io::Error) -> Self {
        Self::Unreadable {
            path: path.into(),
            cause,
        }
    }

    pub fn syntax(path: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            path: path.into(),
            line,
            message: message.into(),
        }
    }
}

/// Failure to list the versions of a single module
#[derive(Error, Debug)]
pub enum FetchError {
    /// 404 or 410 from the proxy
    #[error("{proxy} does not know module '{module}'")]
    ModuleNotFound { module: String, proxy: String },

    #[error("fetching '{module}' from {proxy} failed: {message}")]
    Network {
        module: String,
        proxy: String,
        message: String,
    },

    #[error("{proxy} is rate limiting requests")]
    RateLimited { proxy: String },

    #[error("{proxy} sent an unusable answer for '{module}': {message}")]
    InvalidResponse {
        module: String,
        proxy: String,
        message: String,
    },

    #[error("fetching '{module}' from {proxy} timed out")]
    Timeout { module: String, proxy: String },
}

impl FetchError {
    pub fn module_not_found(module: impl Into<String>, proxy: impl Into<String>) -> Self {
        Self::ModuleNotFound {
            module: module.into(),
            proxy: proxy.into(),
        }
    }

    pub fn network(
        module: impl Into<String>,
        proxy: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Network {
            module: module.into(),
            proxy: proxy.into(),
            message: message.into(),
        }
    }

    pub fn rate_limited(proxy: impl Into<String>) -> Self {
        Self::RateLimited {
            proxy: proxy.into(),
        }
    }

    pub fn invalid_response(
        module: impl Into<String>,
        proxy: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidResponse {
            module: module.into(),
            proxy: proxy.into(),
            message: message.into(),
        }
    }

    pub fn timeout(module: impl Into<String>, proxy: impl Into<String>) -> Self {
        Self::Timeout {
            module: module.into(),
            proxy: proxy.into(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid max versions {value}: must be between {min} and {max}")]
    InvalidMaxVersions { value: usize, min: usize, max: usize },

    #[error("invalid filter value '{value}': expected a comma-separated list of 'major', 'minor' and 'patch'")]
    InvalidFilter { value: String },

    #[error("invalid concurrency {value}: must be at least 1")]
    InvalidConcurrency { value: usize },

    #[error("invalid width {value}: must be at least {min}")]
    InvalidWidth { value: usize, min: usize },

    #[error("conflicting options: {message}")]
    ConflictingOptions { message: String },
}
