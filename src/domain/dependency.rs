//! Declared dependency as read from a manifest

use serde::Serialize;
use std::fmt;

/// A requirement declared in the manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeclaredDependency {
    /// Module path (e.g., `github.com/gin-gonic/gin`)
    pub name: String,
    /// Version string exactly as written in the manifest
    pub version: String,
    /// Whether the requirement is marked `// indirect`
    pub indirect: bool,
}

impl DeclaredDependency {
    /// Creates a new declared dependency
    pub fn new(name: impl Into<String>, version: impl Into<String>, indirect: bool) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            indirect,
        }
    }

    /// Creates a direct requirement
    pub fn direct(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self::new(name, version, false)
    }

    /// Creates an indirect requirement
    pub fn indirect(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self::new(name, version, true)
    }
}

impl fmt::Display for DeclaredDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.indirect { " (indirect)" } else { "" };
        write!(f, "{}@{}{}", self.name, self.version, marker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct() {
        let dep = DeclaredDependency::direct("github.com/gin-gonic/gin", "v1.9.1");
        assert_eq!(dep.name, "github.com/gin-gonic/gin");
        assert_eq!(dep.version, "v1.9.1");
        assert!(!dep.indirect);
    }

    #[test]
    fn test_indirect() {
        let dep = DeclaredDependency::indirect("golang.org/x/text", "v0.14.0");
        assert!(dep.indirect);
    }

    #[test]
    fn test_display() {
        let dep = DeclaredDependency::direct("github.com/pkg/errors", "v0.9.1");
        assert_eq!(dep.to_string(), "github.com/pkg/errors@v0.9.1");

        let dep = DeclaredDependency::indirect("golang.org/x/text", "v0.14.0");
        assert_eq!(dep.to_string(), "golang.org/x/text@v0.14.0 (indirect)");
    }
}
