//! JSON Schema validation for tag documents, catalogs, analyzer output and
//! registry responses

use crate::error::{Error, Result};
use jsonschema::Validator;
use rust_embed::RustEmbed;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

/// `expected` / `actual` documents
pub const EXPECTED_ACTUAL: &str = "expected-actual";
/// `catalog` output and `uncatalog` input
pub const CATALOG: &str = "catalog";
/// `analyze --format json` output
pub const ANALYZER_OUTPUT: &str = "analyzer-output";
/// Registry `tags/list` responses
pub const REGISTRY_TAGS: &str = "registry-tags";

/// Embedded schema files
#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/../../schemas/"]
#[prefix = ""]
struct EmbeddedSchemas;

/// Schema validator with pre-compiled schemas
#[derive(Debug)]
pub struct SchemaValidator {
    /// Compiled schemas by name
    schemas: HashMap<String, Validator>,
}

/// Global schema validator instance
static VALIDATOR: OnceLock<SchemaValidator> = OnceLock::new();

impl SchemaValidator {
    /// Create a new schema validator with embedded schemas
    pub fn new() -> Result<Self> {
        let mut schemas = HashMap::new();

        for file in EmbeddedSchemas::iter() {
            let Some(name) = file.strip_suffix(".schema.json") else {
                continue;
            };

            debug!("Loading embedded schema: {}", name);

            if let Some(content) = EmbeddedSchemas::get(&file) {
                let json_str = std::str::from_utf8(&content.data).map_err(|_| {
                    Error::invalid_config(format!("Invalid UTF-8 in schema: {}", file))
                })?;

                schemas.insert(name.to_string(), compile(name, json_str)?);
            }
        }

        if schemas.is_empty() {
            return Err(Error::schema_not_found("no embedded schemas"));
        }

        Ok(Self { schemas })
    }

    /// Load from external schema directory (for development)
    pub fn from_directory(path: &Path) -> Result<Self> {
        let mut schemas = HashMap::new();

        if path.is_dir() {
            for entry in std::fs::read_dir(path)? {
                let file_path = entry?.path();
                let Some(name) = file_path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .and_then(|n| n.strip_suffix(".schema.json"))
                else {
                    continue;
                };

                debug!("Loading schema from file: {:?}", file_path);

                let content = std::fs::read_to_string(&file_path)?;
                schemas.insert(name.to_string(), compile(name, &content)?);
            }
        }

        if schemas.is_empty() {
            return Err(Error::schema_not_found(format!(
                "No schemas found in {:?}",
                path
            )));
        }

        Ok(Self { schemas })
    }

    /// Get the global validator instance
    pub fn global() -> &'static SchemaValidator {
        VALIDATOR.get_or_init(|| {
            SchemaValidator::new().expect("Failed to initialize global schema validator")
        })
    }

    /// Validate JSON value against a schema
    pub fn validate(&self, value: &Value, schema_name: &str) -> Result<()> {
        let schema = self
            .schemas
            .get(schema_name)
            .ok_or_else(|| Error::schema_not_found(schema_name))?;

        let errors: Vec<String> = schema
            .iter_errors(value)
            .map(|e| {
                let path = e.instance_path().to_string();
                if path.is_empty() {
                    format!("  - {}", e)
                } else {
                    format!("  - {}: {}", path, e)
                }
            })
            .collect();

        if !errors.is_empty() {
            return Err(Error::schema_validation(errors));
        }

        Ok(())
    }

    /// Serialize a value and validate the result
    pub fn validate_serialized<T: Serialize>(&self, value: &T, schema_name: &str) -> Result<()> {
        self.validate(&serde_json::to_value(value)?, schema_name)
    }

    /// Check if a schema exists
    pub fn has_schema(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// List available schemas, sorted by name
    pub fn list_schemas(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.schemas.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }
}

fn compile(name: &str, json_str: &str) -> Result<Validator> {
    let schema_value: Value = serde_json::from_str(json_str)?;
    jsonschema::validator_for(&schema_value)
        .map_err(|e| Error::invalid_config(format!("Failed to compile schema {}: {}", name, e)))
}
