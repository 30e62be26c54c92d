//! Error types for equilibrium-core

use thiserror::Error;

/// Result type alias using equilibrium-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for Equilibrium
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// Invalid configuration value
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Schema validation error
    #[error("Schema validation failed:\n{errors}")]
    SchemaValidation { errors: String },

    /// Schema not found
    #[error("Schema not found: {name}")]
    SchemaNotFound { name: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Not a strict MAJOR.MINOR.PATCH version
    #[error("Invalid semantic version: '{version}' (expected MAJOR.MINOR.PATCH without prefix or suffix)")]
    InvalidVersion { version: String },

    /// Not a sha256 digest
    #[error("Invalid digest: '{digest}' (expected sha256:<64 lowercase hex characters>)")]
    InvalidDigest { digest: String },

    /// Repository URL without a namespace
    #[error("Repository URL must be full format (e.g., 'gcr.io/project-id/image-name'), not '{url}'")]
    InvalidRepositoryUrl { url: String },

    /// Expected and actual data describe different repositories
    #[error("Repository {field}s do not match: expected '{expected}', actual '{actual}'")]
    RepositoryMismatch {
        field: &'static str,
        expected: String,
        actual: String,
    },

    /// Mutable tag whose digest has no semantic tag (strict mapping only)
    #[error("No semantic version found for mutable tag '{tag}' (digest {digest})")]
    CanonicalLookup { tag: String, digest: String },
}

impl Error {
    /// Create a config not found error
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a schema validation error from a list of errors
    pub fn schema_validation(errors: Vec<String>) -> Self {
        Self::SchemaValidation {
            errors: errors.join("\n"),
        }
    }

    /// Create a schema not found error
    pub fn schema_not_found(name: impl Into<String>) -> Self {
        Self::SchemaNotFound { name: name.into() }
    }

    /// Create an invalid version error
    pub fn invalid_version(version: impl Into<String>) -> Self {
        Self::InvalidVersion {
            version: version.into(),
        }
    }

    /// Create an invalid digest error
    pub fn invalid_digest(digest: impl Into<String>) -> Self {
        Self::InvalidDigest {
            digest: digest.into(),
        }
    }

    /// Create an invalid repository URL error
    pub fn invalid_repository_url(url: impl Into<String>) -> Self {
        Self::InvalidRepositoryUrl { url: url.into() }
    }

    /// Create a repository mismatch error
    pub fn repository_mismatch(
        field: &'static str,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::RepositoryMismatch {
            field,
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create a canonical lookup error
    pub fn canonical_lookup(tag: impl Into<String>, digest: impl Into<String>) -> Self {
        Self::CanonicalLookup {
            tag: tag.into(),
            digest: digest.into(),
        }
    }
}
