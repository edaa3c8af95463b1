//! Manifest reading
//!
//! This module provides functionality to:
//! - Read a go.mod file from disk
//! - Parse the declared requirements into (name, version) pairs

mod go_mod;

pub use go_mod::GoModReader;

use crate::domain::DeclaredDependency;
use crate::error::ManifestError;
use std::path::Path;

/// Requirements declared by a manifest
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    /// The manifest's own module path, if declared
    pub module: Option<String>,
    /// Requirements in declaration order
    pub dependencies: Vec<DeclaredDependency>,
}

impl Manifest {
    /// Requirements to check, optionally including indirect ones
    pub fn selected(&self, include_indirect: bool) -> Vec<DeclaredDependency> {
        self.dependencies
            .iter()
            .filter(|d| include_indirect || !d.indirect)
            .cloned()
            .collect()
    }
}

/// Trait for parsing manifest files
pub trait ManifestReader {
    /// Parse requirements from manifest content
    fn parse(&self, content: &str) -> Result<Manifest, ManifestError>;
}

/// Read and parse a go.mod file
pub fn read_manifest(path: &Path) -> Result<Manifest, ManifestError> {
    read_manifest_with(&GoModReader, path)
}

/// Read a manifest file with the given reader
pub fn read_manifest_with(
    reader: &dyn ManifestReader,
    path: &Path,
) -> Result<Manifest, ManifestError> {
    if !path.exists() {
        return Err(ManifestError::missing(path));
    }

    let content =
        std::fs::read_to_string(path).map_err(|e| ManifestError::unreadable(path, e))?;

    reader.parse(&content).map_err(|e| match e {
        ManifestError::Syntax { line, message, .. } => {
            ManifestError::syntax(path, line, message)
        }
        other => other,
    })
}
