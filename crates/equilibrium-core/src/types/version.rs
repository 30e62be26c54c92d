use crate::error::{Error, Result};
use crate::tags::is_semantic_version;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Strict `MAJOR.MINOR.PATCH` version of an immutable tag
///
/// Only plain numeric triples without leading zeros are accepted; prefixes
/// (`v1.2.3`), prereleases (`1.2.3-rc.1`) and build metadata are rejected.
/// Ordering is numeric per component.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SemanticVersion(semver::Version);

impl SemanticVersion {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self(semver::Version::new(major, minor, patch))
    }

    /// Parse a tag, rejecting anything that is not a strict semantic version
    pub fn parse(tag: &str) -> Result<Self> {
        if !is_semantic_version(tag) {
            return Err(Error::invalid_version(tag));
        }
        semver::Version::parse(tag)
            .map(Self)
            .map_err(|_| Error::invalid_version(tag))
    }

    pub fn major(&self) -> u64 {
        self.0.major
    }

    pub fn minor(&self) -> u64 {
        self.0.minor
    }

    pub fn patch(&self) -> u64 {
        self.0.patch
    }

    /// The `MAJOR` mutable tag this version falls under
    pub fn major_tag(&self) -> String {
        self.0.major.to_string()
    }

    /// The `MAJOR.MINOR` mutable tag this version falls under
    pub fn minor_tag(&self) -> String {
        format!("{}.{}", self.0.major, self.0.minor)
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SemanticVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SemanticVersion {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<SemanticVersion> for String {
    fn from(version: SemanticVersion) -> Self {
        version.to_string()
    }
}
