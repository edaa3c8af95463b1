//! go.mod reader for Go projects
//!
//! Handles:
//! - module directive
//! - require statements (single and block)
//! - // indirect comments
//! - replace, exclude and retract directives (skipped)

use crate::domain::DeclaredDependency;
use crate::error::ManifestError;
use crate::manifest::{Manifest, ManifestReader};
use regex::Regex;
use std::sync::LazyLock;

/// Reader for go.mod files
pub struct GoModReader;

// Regex for module directive: module example.com/project
static MODULE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^module\s+"?([^"\s]+)"?\s*(//.*)?$"#).unwrap());

// Regex for single require: require module/path v1.2.3 // comment
static SINGLE_REQUIRE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^require\s+"?([^"\s()]+)"?\s+(\S+)\s*(//.*)?$"#).unwrap()
});

// Regex for require block entry: module/path v1.2.3 // comment
static BLOCK_ENTRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^"?([^"\s()]+)"?\s+(\S+)\s*(//.*)?$"#).unwrap());

// Regex for block start: require ( / replace ( / exclude ( / retract (
static BLOCK_START_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\w+)\s*\(\s*(//.*)?$").unwrap());

// Regex for indirect marker inside a line comment
static INDIRECT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^//\s*indirect\b").unwrap());

/// Which kind of parenthesized block the reader is inside
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Block {
    Require,
    Other,
}

impl ManifestReader for GoModReader {
    fn parse(&self, content: &str) -> Result<Manifest, ManifestError> {
        let mut manifest = Manifest::default();
        let mut block: Option<(Block, usize)> = None;

        for (index, line) in content.lines().enumerate() {
            let line_no = index + 1;
            let trimmed = line.trim();

            // Skip empty lines and comments
            if trimmed.is_empty() || trimmed.starts_with("//") {
                continue;
            }

            if let Some((kind, _)) = block {
                if trimmed == ")" || trimmed.starts_with(") ") || trimmed.starts_with(")//") {
                    block = None;
                    continue;
                }
                if kind == Block::Require {
                    let caps = BLOCK_ENTRY_RE.captures(trimmed).ok_or_else(|| {
                        ManifestError::syntax(
                            "go.mod",
                            line_no,
                            format!("malformed require entry '{}'", trimmed),
                        )
                    })?;
                    manifest.dependencies.push(dependency_from(&caps));
                }
                continue;
            }

            if let Some(caps) = BLOCK_START_RE.captures(trimmed) {
                let kind = match &caps[1] {
                    "require" => Block::Require,
                    _ => Block::Other,
                };
                block = Some((kind, line_no));
                continue;
            }

            if let Some(caps) = MODULE_RE.captures(trimmed) {
                manifest.module = Some(caps[1].to_string());
                continue;
            }

            if trimmed.starts_with("require ") || trimmed.starts_with("require\t") {
                let caps = SINGLE_REQUIRE_RE.captures(trimmed).ok_or_else(|| {
                    ManifestError::syntax(
                        "go.mod",
                        line_no,
                        format!("malformed require directive '{}'", trimmed),
                    )
                })?;
                manifest.dependencies.push(dependency_from(&caps));
            }

            // go, toolchain, replace, exclude, retract and godebug lines carry no requirements
        }

        if let Some((_, start)) = block {
            return Err(ManifestError::syntax(
                "go.mod",
                start,
                "block is never closed",
            ));
        }

        Ok(manifest)
    }
}

fn dependency_from(caps: &regex::Captures) -> DeclaredDependency {
    let is_indirect = caps
        .get(3)
        .map(|m| INDIRECT_RE.is_match(m.as_str()))
        .unwrap_or(false);
    DeclaredDependency::new(&caps[1], &caps[2], is_indirect)
}
