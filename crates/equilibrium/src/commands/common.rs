//! Helpers shared by the commands

use crate::cli::OutputFormat;
use crate::output;
use crate::summary;
use anyhow::{bail, Context, Result};
use camino::Utf8Path;
use equilibrium_core::config::{ConfigLoader, RegistryConfig};
use equilibrium_core::schema::{SchemaValidator, EXPECTED_ACTUAL};
use equilibrium_core::types::{RepositoryUrl, TagDigestMap, TagsDocument};
use equilibrium_core::EquilibriumConfig;
use equilibrium_registry::RegistryClient;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::io::Read;
use tracing::debug;

/// Load configuration from defaults, config file and environment
pub fn load_config(config_path: Option<&Utf8Path>) -> Result<EquilibriumConfig> {
    let loader = match config_path {
        Some(path) => ConfigLoader::with_file(path.to_path_buf()),
        None => ConfigLoader::new(),
    };
    loader.load().context("Failed to load configuration")
}

/// Fetch every tag of a repository with its digest
pub async fn fetch_tags(repository: &RepositoryUrl, config: &RegistryConfig) -> Result<TagDigestMap> {
    let client = RegistryClient::new(config)?;

    let spinner = output::spinner(&format!("Fetching tags for {}", repository));
    let result = client.list_tags(&repository.to_string()).await;
    spinner.finish_and_clear();

    let tags = result?;
    debug!("{}: {} tags with digests", repository, tags.len());
    Ok(tags)
}

/// Read a whole file, or stdin when no file is given
///
/// Empty stdin is an error carrying `usage_hint`.
pub fn read_input(file: Option<&Utf8Path>, usage_hint: &str) -> Result<String> {
    match file {
        Some(path) => {
            if !path.exists() {
                bail!("File not found: {}", path);
            }
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path))?;
            Ok(content.trim().to_string())
        }
        None => {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .context("Failed to read stdin")?;
            let content = content.trim();
            if content.is_empty() {
                bail!("No input provided. Use: {}", usage_hint);
            }
            Ok(content.to_string())
        }
    }
}

/// Parse JSON input, check it against a schema, and deserialize it
pub fn parse_validated<T: DeserializeOwned>(
    input: &str,
    schema: &str,
    source: &str,
    failure: &str,
) -> Result<T> {
    let value: Value =
        serde_json::from_str(input).with_context(|| format!("Invalid JSON in {}", source))?;
    SchemaValidator::global()
        .validate(&value, schema)
        .with_context(|| failure.to_string())?;
    serde_json::from_value(value).with_context(|| format!("Invalid data in {}", source))
}

/// Load and validate an expected/actual tags file
pub fn load_document(path: &Utf8Path, label: &str) -> Result<TagsDocument> {
    let input = read_input(Some(path), "")?;
    parse_validated(
        &input,
        EXPECTED_ACTUAL,
        path.as_str(),
        &format!("{} data schema validation failed", label),
    )
}

/// Validate serialized output against its schema before anything is printed
pub fn validate_output<T: Serialize>(value: &T, schema: &str) -> Result<()> {
    SchemaValidator::global()
        .validate_serialized(value, schema)
        .with_context(|| format!("Output does not match the {} schema", schema))
}

/// Print any value as pretty JSON
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Validate and print a tags document in the requested format
pub fn print_document(document: &TagsDocument, format: OutputFormat, kind: &str) -> Result<()> {
    validate_output(document, EXPECTED_ACTUAL)?;
    match format {
        OutputFormat::Json => print_json(document),
        OutputFormat::Summary => {
            println!("{}", summary::render_tags(document, kind));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    const DOCUMENT: &str = r#"{
        "repository_url": "gcr.io/proj/app",
        "repository_name": "app",
        "digests": { "latest": "sha256:aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa" },
        "canonical_versions": { "latest": "1.0.0" }
    }"#;

    fn write(dir: &TempDir, name: &str, content: &str) -> Utf8PathBuf {
        let path = Utf8PathBuf::from_path_buf(dir.path().join(name)).expect("utf-8 path");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_document() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "expected.json", DOCUMENT);

        let document = load_document(&path, "Expected").unwrap();
        assert_eq!(document.repository_name, "app");
        assert_eq!(document.digests.len(), 1);
    }

    #[test]
    fn test_load_document_missing_file() {
        let err = load_document(&Utf8PathBuf::from("/nonexistent/expected.json"), "Expected")
            .unwrap_err();
        assert_eq!(err.to_string(), "File not found: /nonexistent/expected.json");
    }

    #[test]
    fn test_load_document_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "expected.json", "{ not json");

        let err = load_document(&path, "Expected").unwrap_err();
        assert!(err.to_string().starts_with("Invalid JSON in "));
    }

    #[test]
    fn test_load_document_schema_failure() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "actual.json", r#"{"repository_url": "gcr.io/proj/app"}"#);

        let err = load_document(&path, "Actual").unwrap_err();
        assert_eq!(err.to_string(), "Actual data schema validation failed");
        assert!(format!("{:#}", err).contains("required"));
    }
}
