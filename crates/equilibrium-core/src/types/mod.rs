//! Type definitions for Equilibrium

mod digest;
mod document;
mod repository;
mod version;

pub use digest::Digest;
pub use document::TagsDocument;
pub use repository::RepositoryUrl;
pub use version::SemanticVersion;

use std::collections::BTreeMap;

/// Tag → digest mapping for one repository
pub type TagDigestMap = BTreeMap<String, Digest>;

/// Semantic version → digest mapping (the immutable tags of a repository)
pub type SemanticTagMap = BTreeMap<SemanticVersion, Digest>;

/// Mutable tag → the semantic version it resolves to
pub type CanonicalVersionMap = BTreeMap<String, SemanticVersion>;
