//! Tag classification
//!
//! A registry listing mixes immutable semantic tags (`1.2.3`), mutable
//! tags (`latest`, `1`, `1.2`) and anything else a team happens to push
//! (`main`, `v1.2.3`, `1.2.3-rc.1`). The two predicates below are the single
//! source of truth for telling them apart; they are mutually exclusive
//! because a semantic version always has three components and a mutable
//! tag at most two.

use crate::error::{Error, Result};
use crate::types::{SemanticTagMap, SemanticVersion, TagDigestMap};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::trace;

static SEMANTIC_VERSION: OnceLock<Regex> = OnceLock::new();
static MUTABLE_TAG: OnceLock<Regex> = OnceLock::new();

fn semantic_version_pattern() -> &'static Regex {
    SEMANTIC_VERSION.get_or_init(|| {
        Regex::new(r"^(0|[1-9][0-9]*)\.(0|[1-9][0-9]*)\.(0|[1-9][0-9]*)$").expect("valid semver regex")
    })
}

fn mutable_tag_pattern() -> &'static Regex {
    MUTABLE_TAG.get_or_init(|| {
        Regex::new(r"^(latest|[0-9]+|[0-9]+\.[0-9]+)$").expect("valid mutable tag regex")
    })
}

/// Strict `MAJOR.MINOR.PATCH`, no leading zeros, no prefix or suffix
pub fn is_semantic_version(tag: &str) -> bool {
    semantic_version_pattern().is_match(tag)
}

/// `latest`, `MAJOR` or `MAJOR.MINOR`
pub fn is_mutable_tag(tag: &str) -> bool {
    mutable_tag_pattern().is_match(tag)
}

/// A parsed mutable tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutableTag {
    Latest,
    Major(u64),
    Minor(u64, u64),
}

impl MutableTag {
    pub const LATEST: &'static str = "latest";
}

impl FromStr for MutableTag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if !is_mutable_tag(s) {
            return Err(Error::invalid_version(s));
        }
        if s == Self::LATEST {
            return Ok(Self::Latest);
        }
        let invalid = |_| Error::invalid_version(s);
        match s.split_once('.') {
            Some((major, minor)) => Ok(Self::Minor(
                major.parse().map_err(invalid)?,
                minor.parse().map_err(invalid)?,
            )),
            None => Ok(Self::Major(s.parse().map_err(invalid)?)),
        }
    }
}

impl fmt::Display for MutableTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Latest => f.write_str(Self::LATEST),
            Self::Major(major) => write!(f, "{}", major),
            Self::Minor(major, minor) => write!(f, "{}.{}", major, minor),
        }
    }
}

/// A full registry listing split by tag kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedTags {
    /// Immutable `MAJOR.MINOR.PATCH` tags
    pub semantic: SemanticTagMap,
    /// `latest`, `MAJOR` and `MAJOR.MINOR` tags
    pub mutable: TagDigestMap,
    /// Tags matching neither predicate
    pub ignored: Vec<String>,
}

/// Split a full tag listing into semantic and mutable subsets
pub fn classify(all_tags: &TagDigestMap) -> ClassifiedTags {
    let mut classified = ClassifiedTags::default();

    for (tag, digest) in all_tags {
        if is_mutable_tag(tag) {
            classified.mutable.insert(tag.clone(), digest.clone());
            continue;
        }
        match SemanticVersion::parse(tag) {
            Ok(version) => {
                classified.semantic.insert(version, digest.clone());
            }
            Err(_) => {
                trace!("Ignoring tag outside the versioning scheme: {}", tag);
                classified.ignored.push(tag.clone());
            }
        }
    }

    classified
}

/// Keep only the semantic tags of a listing
pub fn filter_semantic_tags(all_tags: &TagDigestMap) -> SemanticTagMap {
    classify(all_tags).semantic
}

/// Keep only the mutable tags of a listing
pub fn filter_mutable_tags(all_tags: &TagDigestMap) -> TagDigestMap {
    all_tags
        .iter()
        .filter(|(tag, _)| is_mutable_tag(tag))
        .map(|(tag, digest)| (tag.clone(), digest.clone()))
        .collect()
}
