//! Registry API response types

use anyhow::{Context, Result};
use equilibrium_core::types::{Digest, TagDigestMap};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::trace;

/// Response of `GET /v2/<name>/tags/list`
///
/// `manifest` is a non-standard extension (GCR, Artifact Registry) mapping
/// each digest to the tags that point at it. Registries following the plain
/// v2 API return only `name` and `tags`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagsListResponse {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub manifest: BTreeMap<String, ManifestEntry>,
}

/// Per-digest metadata inside `manifest`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    #[serde(default)]
    pub tag: Vec<String>,
}

impl TagsListResponse {
    /// Append the tags and manifest entries of a further page
    pub fn extend(&mut self, page: TagsListResponse) {
        if self.name.is_empty() {
            self.name = page.name;
        }
        self.tags.extend(page.tags);
        for (digest, entry) in page.manifest {
            self.manifest.entry(digest).or_default().tag.extend(entry.tag);
        }
    }

    /// Tag to digest for every listed tag with digest information
    pub fn tag_digests(&self) -> Result<TagDigestMap> {
        let mut by_tag: HashMap<&str, Digest> = HashMap::new();
        for (digest, entry) in &self.manifest {
            let digest = Digest::parse(digest.as_str())
                .with_context(|| format!("Invalid digest in registry manifest: {}", digest))?;
            for tag in &entry.tag {
                by_tag.insert(tag.as_str(), digest.clone());
            }
        }

        let mut result = TagDigestMap::new();
        for tag in &self.tags {
            match by_tag.get(tag.as_str()) {
                Some(digest) => {
                    result.insert(tag.clone(), digest.clone());
                }
                None => trace!("No digest for tag {}, omitting", tag),
            }
        }

        Ok(result)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const DIGEST_A: &str = "sha256:aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
    const DIGEST_B: &str = "sha256:bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";

    #[test]
    fn test_manifest_is_inverted() {
        let response: TagsListResponse = serde_json::from_value(json!({
            "name": "proj/app",
            "tags": ["1.0.0", "latest", "0.9.0", "orphan"],
            "manifest": {
                DIGEST_A: { "tag": ["1.0.0", "latest"], "imageSizeBytes": "123" },
                DIGEST_B: { "tag": ["0.9.0"] }
            }
        }))
        .unwrap();

        let digests = response.tag_digests().unwrap();
        assert_eq!(digests.len(), 3);
        assert_eq!(digests["latest"].as_str(), DIGEST_A);
        assert_eq!(digests["0.9.0"].as_str(), DIGEST_B);
        assert!(!digests.contains_key("orphan"));
    }

    #[test]
    fn test_without_manifest_has_no_digests() {
        let response: TagsListResponse =
            serde_json::from_value(json!({ "name": "proj/app", "tags": ["1.0.0"] })).unwrap();
        assert!(response.tag_digests().unwrap().is_empty());
    }

    #[test]
    fn test_null_tags() {
        let response: TagsListResponse =
            serde_json::from_value(json!({ "name": "proj/app", "tags": null })).unwrap();
        assert!(response.tags.is_empty());
    }

    #[test]
    fn test_extend_merges_pages() {
        let mut first: TagsListResponse = serde_json::from_value(json!({
            "name": "proj/app",
            "tags": ["1.0.0"],
            "manifest": { DIGEST_A: { "tag": ["1.0.0"] } }
        }))
        .unwrap();
        let second: TagsListResponse = serde_json::from_value(json!({
            "name": "proj/app",
            "tags": ["1"],
            "manifest": { DIGEST_A: { "tag": ["1"] } }
        }))
        .unwrap();

        first.extend(second);
        let digests = first.tag_digests().unwrap();
        assert_eq!(digests.len(), 2);
        assert_eq!(digests["1"], digests["1.0.0"]);
    }
}
