//! Catalog format: a flat image list per repository

use crate::sort::sorted_tags;
use crate::types::{
    CanonicalVersionMap, Digest, RepositoryUrl, SemanticVersion, TagDigestMap, TagsDocument,
};
use serde::{Deserialize, Serialize};

/// One tag of a catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogImage {
    pub tag: String,
    pub digest: Digest,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canonical_version: Option<SemanticVersion>,
}

/// Catalog of a repository's mutable tags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub repository_url: RepositoryUrl,
    pub repository_name: String,
    pub images: Vec<CatalogImage>,
}

/// Flatten a tags document into a catalog, latest first
pub fn build_catalog(document: &TagsDocument) -> Catalog {
    let images = sorted_tags(document.digests.keys())
        .into_iter()
        .map(|tag| CatalogImage {
            tag: tag.to_string(),
            digest: document.digests[tag].clone(),
            canonical_version: document.canonical_versions.get(tag).cloned(),
        })
        .collect();

    Catalog {
        repository_url: document.repository_url.clone(),
        repository_name: document.repository_name.clone(),
        images,
    }
}

/// Rebuild a tags document from a catalog
pub fn reverse_catalog(catalog: &Catalog) -> TagsDocument {
    let mut digests = TagDigestMap::new();
    let mut canonical_versions = CanonicalVersionMap::new();

    for image in &catalog.images {
        digests.insert(image.tag.clone(), image.digest.clone());
        if let Some(version) = &image.canonical_version {
            canonical_versions.insert(image.tag.clone(), version.clone());
        }
    }

    TagsDocument {
        repository_url: catalog.repository_url.clone(),
        repository_name: catalog.repository_name.clone(),
        digests,
        canonical_versions,
    }
}
