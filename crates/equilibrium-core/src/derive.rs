//! Expected mutable tags from semantic versions
//!
//! Given every immutable `MAJOR.MINOR.PATCH` tag of a repository, the
//! mutable tags that *should* exist are:
//! - `latest` → the highest version overall
//! - `MAJOR` → the highest version sharing that major
//! - `MAJOR.MINOR` → the highest version sharing that major and minor

use crate::sort::serialize_descending;
use crate::tags::MutableTag;
use crate::types::{CanonicalVersionMap, SemanticTagMap, SemanticVersion, TagDigestMap};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::trace;

/// Derived mutable tags with their digests and the versions they resolve to
///
/// `digests` and `canonical_versions` always share the same key set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualTagResult {
    #[serde(serialize_with = "serialize_descending")]
    pub digests: TagDigestMap,
    #[serde(serialize_with = "serialize_descending")]
    pub canonical_versions: CanonicalVersionMap,
}

impl VirtualTagResult {
    pub fn is_empty(&self) -> bool {
        self.digests.is_empty()
    }

    pub fn len(&self) -> usize {
        self.digests.len()
    }
}

/// Computes the expected mutable tag set
pub struct VersionTagDeriver;

impl VersionTagDeriver {
    /// Derive `latest`, `MAJOR` and `MAJOR.MINOR` tags from semantic tags
    pub fn derive_virtual_tags(semantic_tags: &SemanticTagMap) -> VirtualTagResult {
        let mut latest: Option<&SemanticVersion> = None;
        let mut per_major: BTreeMap<u64, &SemanticVersion> = BTreeMap::new();
        let mut per_minor: BTreeMap<(u64, u64), &SemanticVersion> = BTreeMap::new();

        // Single pass tracking the three running maximums
        for version in semantic_tags.keys() {
            if latest.is_none_or(|current| version > current) {
                latest = Some(version);
            }

            per_major
                .entry(version.major())
                .and_modify(|current| {
                    if version > *current {
                        *current = version;
                    }
                })
                .or_insert(version);

            per_minor
                .entry((version.major(), version.minor()))
                .and_modify(|current| {
                    if version > *current {
                        *current = version;
                    }
                })
                .or_insert(version);
        }

        let mut result = VirtualTagResult::default();
        let mut emit = |tag: MutableTag, version: &SemanticVersion| {
            // Every tracked version is a key of the input map
            if let Some(digest) = semantic_tags.get(version) {
                trace!("{} -> {} ({})", tag, version, digest);
                result.digests.insert(tag.to_string(), digest.clone());
                result
                    .canonical_versions
                    .insert(tag.to_string(), version.clone());
            }
        };

        if let Some(version) = latest {
            emit(MutableTag::Latest, version);
        }
        for (major, version) in per_major {
            emit(MutableTag::Major(major), version);
        }
        for ((major, minor), version) in per_minor {
            emit(MutableTag::Minor(major, minor), version);
        }

        result
    }
}
