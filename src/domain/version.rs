//! Comparable semantic version
//!
//! Accepts the grammar used by Go module versions:
//! - Release: `v1.2.3` or `1.2.3`
//! - Prerelease: `v1.2.3-beta.1`
//! - Pseudo-version: `v0.0.0-20210101120000-abcdef123456`
//! - Build metadata: `v2.0.0+incompatible`
//!
//! Ordering follows semantic-versioning precedence. Build metadata and the
//! leading `v` never affect ordering or equality.

use crate::error::VersionParseError;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Build metadata Go attaches to v2+ releases of modules without a `/vN` path
const INCOMPATIBLE_BUILD: &str = "incompatible";

/// A parsed, immutable version
#[derive(Debug, Clone)]
pub struct Version {
    original: String,
    inner: semver::Version,
}

impl Version {
    /// Parse a version string, tolerating a single leading `v`
    pub fn parse(raw: &str) -> Result<Self, VersionParseError> {
        let trimmed = raw.trim();
        let body = trimmed.strip_prefix('v').unwrap_or(trimmed);

        let inner = semver::Version::parse(body)
            .map_err(|e| VersionParseError::new(raw, e.to_string()))?;

        Ok(Self {
            original: trimmed.to_string(),
            inner,
        })
    }

    /// The input as written, minus surrounding whitespace
    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn major(&self) -> u64 {
        self.inner.major
    }

    pub fn minor(&self) -> u64 {
        self.inner.minor
    }

    /// True when the version carries Go's `+incompatible` marker
    pub fn is_incompatible(&self) -> bool {
        self.inner.build.as_str() == INCOMPATIBLE_BUILD
    }

    fn triple(&self) -> (u64, u64, u64) {
        (self.inner.major, self.inner.minor, self.inner.patch)
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.triple()
            .cmp(&other.triple())
            .then_with(|| compare_prerelease(&self.inner.pre, &other.inner.pre))
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.triple().hash(state);
        self.inner.pre.as_str().hash(state);
    }
}

/// A release ranks above any prerelease of the same triple
fn compare_prerelease(a: &semver::Prerelease, b: &semver::Prerelease) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.cmp(b),
    }
}

impl FromStr for Version {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.original)
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.original)
    }
}
