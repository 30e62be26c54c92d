use super::{CanonicalVersionMap, RepositoryUrl, TagDigestMap};
use crate::canonical::{map_to_canonical_versions, MappingPolicy};
use crate::derive::VersionTagDeriver;
use crate::error::Result;
use crate::sort::serialize_descending;
use crate::tags::classify;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Mutable tags of one repository, as written by `expected`/`actual`
///
/// Tag-keyed maps serialize latest-first, then by version descending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagsDocument {
    pub repository_url: RepositoryUrl,
    pub repository_name: String,
    #[serde(serialize_with = "serialize_descending")]
    pub digests: TagDigestMap,
    #[serde(serialize_with = "serialize_descending")]
    pub canonical_versions: CanonicalVersionMap,
}

impl TagsDocument {
    pub fn new(
        repository_url: RepositoryUrl,
        digests: TagDigestMap,
        canonical_versions: CanonicalVersionMap,
    ) -> Self {
        Self {
            repository_name: repository_url.name().to_string(),
            repository_url,
            digests,
            canonical_versions,
        }
    }

    /// Mutable tags that should exist, derived from the semantic tags of a listing
    pub fn expected(repository_url: RepositoryUrl, all_tags: &TagDigestMap) -> Self {
        let classified = classify(all_tags);
        debug!(
            "{}: {} semantic tags, {} ignored",
            repository_url,
            classified.semantic.len(),
            classified.ignored.len()
        );

        let virtual_tags = VersionTagDeriver::derive_virtual_tags(&classified.semantic);
        Self::new(
            repository_url,
            virtual_tags.digests,
            virtual_tags.canonical_versions,
        )
    }

    /// Mutable tags actually published, mapped back to semantic versions by digest
    pub fn actual(
        repository_url: RepositoryUrl,
        all_tags: &TagDigestMap,
        policy: MappingPolicy,
    ) -> Result<Self> {
        let classified = classify(all_tags);
        debug!(
            "{}: {} mutable tags, {} semantic tags",
            repository_url,
            classified.mutable.len(),
            classified.semantic.len()
        );

        let canonical_versions =
            map_to_canonical_versions(&classified.mutable, &classified.semantic, policy)?;
        Ok(Self::new(
            repository_url,
            classified.mutable,
            canonical_versions,
        ))
    }
}
