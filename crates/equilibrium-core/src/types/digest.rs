use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

static DIGEST_PATTERN: OnceLock<Regex> = OnceLock::new();

fn digest_pattern() -> &'static Regex {
    DIGEST_PATTERN.get_or_init(|| Regex::new(r"^sha256:[a-f0-9]{64}$").expect("valid digest regex"))
}

/// Content-addressed manifest identifier (`sha256:<64 hex>`)
///
/// Digests are opaque: they are only ever compared for equality.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Digest(String);

impl Digest {
    /// Parse and validate a digest string
    pub fn parse(s: impl Into<String>) -> Result<Self> {
        let s = s.into();
        if digest_pattern().is_match(&s) {
            Ok(Self(s))
        } else {
            Err(Error::invalid_digest(s))
        }
    }

    /// Check whether a string is a well-formed digest
    pub fn is_valid(s: &str) -> bool {
        digest_pattern().is_match(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First 12 hex characters, as shown by `docker images`
    pub fn short(&self) -> &str {
        let hex = self.0.trim_start_matches("sha256:");
        &hex[..12]
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Digest {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Digest {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<Digest> for String {
    fn from(digest: Digest) -> Self {
        digest.0
    }
}

impl AsRef<str> for Digest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
