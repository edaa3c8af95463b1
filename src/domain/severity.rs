//! Upgrade severity tiers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How disruptive an upgrade to a candidate version is expected to be
///
/// Variants are declared from least to most severe so the derived ordering
/// ranks `Incompatible > Major > Minor > Patch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityTier {
    /// Same major and minor, newer patch or prerelease
    Patch,
    /// Same major, newer minor
    Minor,
    /// Newer major
    Major,
    /// Crosses the ecosystem's breaking-API boundary (Go `+incompatible`)
    Incompatible,
}

impl SeverityTier {
    /// The tiers a user can select with `--filter`
    pub fn selectable() -> &'static [SeverityTier] {
        &[SeverityTier::Major, SeverityTier::Minor, SeverityTier::Patch]
    }

    /// Returns the plain label
    pub fn label(&self) -> &'static str {
        match self {
            SeverityTier::Patch => "patch",
            SeverityTier::Minor => "minor",
            SeverityTier::Major => "major",
            SeverityTier::Incompatible => "incompatible",
        }
    }
}

impl fmt::Display for SeverityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SeverityTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "patch" => Ok(SeverityTier::Patch),
            "minor" => Ok(SeverityTier::Minor),
            "major" => Ok(SeverityTier::Major),
            "incompatible" => Ok(SeverityTier::Incompatible),
            other => Err(format!("unknown severity tier '{}'", other)),
        }
    }
}
