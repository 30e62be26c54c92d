//! Map published mutable tags back to semantic versions by digest

use crate::error::{Error, Result};
use crate::types::{CanonicalVersionMap, Digest, SemanticTagMap, SemanticVersion, TagDigestMap};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// What to do with a mutable tag whose digest has no semantic tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MappingPolicy {
    /// Leave the tag out of the canonical version map
    #[default]
    Lenient,
    /// Fail with `Error::CanonicalLookup`
    Strict,
}

impl FromStr for MappingPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "lenient" => Ok(Self::Lenient),
            "strict" => Ok(Self::Strict),
            other => Err(Error::invalid_config(format!(
                "Unknown canonical mapping policy '{}' (expected lenient or strict)",
                other
            ))),
        }
    }
}

impl fmt::Display for MappingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lenient => f.write_str("lenient"),
            Self::Strict => f.write_str("strict"),
        }
    }
}

/// Resolve each mutable tag to the semantic version published with the same digest
///
/// When several semantic versions share a digest the highest one is used.
pub fn map_to_canonical_versions(
    mutable_tags: &TagDigestMap,
    semantic_tags: &SemanticTagMap,
    policy: MappingPolicy,
) -> Result<CanonicalVersionMap> {
    // Ascending iteration leaves the highest version per digest
    let by_digest: HashMap<&Digest, &SemanticVersion> = semantic_tags
        .iter()
        .map(|(version, digest)| (digest, version))
        .collect();

    let mut canonical_versions = CanonicalVersionMap::new();
    for (tag, digest) in mutable_tags {
        match by_digest.get(digest) {
            Some(version) => {
                canonical_versions.insert(tag.clone(), (*version).clone());
            }
            None if policy == MappingPolicy::Strict => {
                return Err(Error::canonical_lookup(tag, digest.as_str()));
            }
            None => {
                warn!(
                    "Mutable tag '{}' points to {} which has no semantic tag",
                    tag,
                    digest.short()
                );
            }
        }
    }

    debug!(
        "Mapped {} of {} mutable tags to canonical versions",
        canonical_versions.len(),
        mutable_tags.len()
    );
    Ok(canonical_versions)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digest(c: char) -> Digest {
        Digest::parse(format!("sha256:{}", c.to_string().repeat(64))).unwrap()
    }

    fn mutable(entries: &[(&str, char)]) -> TagDigestMap {
        entries
            .iter()
            .map(|(t, c)| (t.to_string(), digest(*c)))
            .collect()
    }

    fn semantic(entries: &[(&str, char)]) -> SemanticTagMap {
        entries
            .iter()
            .map(|(v, c)| (SemanticVersion::parse(v).unwrap(), digest(*c)))
            .collect()
    }

    #[test]
    fn test_maps_by_digest() {
        let result = map_to_canonical_versions(
            &mutable(&[("latest", 'a'), ("1", 'a'), ("0", 'b')]),
            &semantic(&[("1.2.3", 'a'), ("0.9.0", 'b')]),
            MappingPolicy::Lenient,
        )
        .unwrap();

        assert_eq!(result["latest"], SemanticVersion::new(1, 2, 3));
        assert_eq!(result["1"], SemanticVersion::new(1, 2, 3));
        assert_eq!(result["0"], SemanticVersion::new(0, 9, 0));
    }

    #[test]
    fn test_lenient_omits_unmatched() {
        let result = map_to_canonical_versions(
            &mutable(&[("latest", 'a'), ("dev", 'c')]),
            &semantic(&[("1.0.0", 'a')]),
            MappingPolicy::Lenient,
        )
        .unwrap();

        assert_eq!(result.len(), 1);
        assert!(!result.contains_key("dev"));
    }

    #[test]
    fn test_strict_fails_on_unmatched() {
        let err = map_to_canonical_versions(
            &mutable(&[("latest", 'a'), ("1", 'c')]),
            &semantic(&[("1.0.0", 'a')]),
            MappingPolicy::Strict,
        )
        .unwrap_err();

        match err {
            Error::CanonicalLookup { tag, digest: d } => {
                assert_eq!(tag, "1");
                assert_eq!(d, digest('c').to_string());
            }
            other => panic!("Expected CanonicalLookup, got: {:?}", other),
        }
    }

    #[test]
    fn test_shared_digest_resolves_to_highest_version() {
        let result = map_to_canonical_versions(
            &mutable(&[("1.2", 'a')]),
            &semantic(&[("1.2.4", 'a'), ("1.2.3", 'a'), ("1.2.10", 'a')]),
            MappingPolicy::Strict,
        )
        .unwrap();

        assert_eq!(result["1.2"], SemanticVersion::new(1, 2, 10));
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("strict".parse::<MappingPolicy>().unwrap(), MappingPolicy::Strict);
        assert_eq!("Lenient".parse::<MappingPolicy>().unwrap(), MappingPolicy::Lenient);
        assert!("sometimes".parse::<MappingPolicy>().is_err());
        assert_eq!(MappingPolicy::default(), MappingPolicy::Lenient);
    }
}
