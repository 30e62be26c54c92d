//! Layered configuration loader
//!
//! Precedence (low to high):
//! 1. Embedded defaults (built into binary)
//! 2. User config (~/.equilibrium/config.yaml, or an explicit --config file)
//! 3. Environment variables (EQUILIBRIUM_* prefix)
//! 4. CLI flags (handled by caller)

use super::EquilibriumConfig;
use crate::error::{Error, Result};
use camino::{Utf8Path, Utf8PathBuf};
use rust_embed::RustEmbed;
use serde_yaml_ng::Value;
use std::env;
use std::fs;
use tracing::debug;

/// File name looked up in the config directory
pub const CONFIG_FILE_NAME: &str = "config.yaml";

const DEFAULTS_FILE_NAME: &str = "defaults.yaml";

/// Embedded configuration files
#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/../../embedded/config/"]
#[prefix = ""]
struct EmbeddedConfigs;

/// Where the user-level layer comes from
#[derive(Debug, Clone)]
enum UserLayer {
    /// Optional `config.yaml` inside a directory
    Directory(Utf8PathBuf),
    /// Required file given on the command line
    File(Utf8PathBuf),
    None,
}

/// Configuration loader
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    user_layer: UserLayer,
}

impl ConfigLoader {
    /// Loader reading ~/.equilibrium/config.yaml when present
    pub fn new() -> Self {
        let user_layer = match Self::default_config_dir() {
            Some(dir) => UserLayer::Directory(dir),
            None => UserLayer::None,
        };
        Self { user_layer }
    }

    /// Loader with a custom config directory
    pub fn with_dir(config_dir: Utf8PathBuf) -> Self {
        Self {
            user_layer: UserLayer::Directory(config_dir),
        }
    }

    /// Loader with an explicit config file, which must exist
    pub fn with_file(path: Utf8PathBuf) -> Self {
        Self {
            user_layer: UserLayer::File(path),
        }
    }

    /// Standard config directory (~/.equilibrium)
    fn default_config_dir() -> Option<Utf8PathBuf> {
        let home = dirs::home_dir()?;
        Utf8PathBuf::from_path_buf(home)
            .ok()
            .map(|home| home.join(".equilibrium"))
    }

    /// Path of the user-level config file, if any
    pub fn user_config_path(&self) -> Option<Utf8PathBuf> {
        match &self.user_layer {
            UserLayer::Directory(dir) => Some(dir.join(CONFIG_FILE_NAME)),
            UserLayer::File(path) => Some(path.clone()),
            UserLayer::None => None,
        }
    }

    /// Load configuration with layered precedence
    pub fn load(&self) -> Result<EquilibriumConfig> {
        let mut merged = Self::load_embedded_defaults()?;

        match &self.user_layer {
            UserLayer::File(path) => {
                if !path.exists() {
                    return Err(Error::config_not_found(path.as_str()));
                }
                merge_values(&mut merged, Self::load_yaml_file(path)?);
            }
            UserLayer::Directory(dir) => {
                let path = dir.join(CONFIG_FILE_NAME);
                if path.exists() {
                    merge_values(&mut merged, Self::load_yaml_file(&path)?);
                }
            }
            UserLayer::None => {}
        }

        let config: EquilibriumConfig = serde_yaml_ng::from_value(merged)
            .map_err(|e| Error::invalid_config(format!("Invalid configuration: {}", e)))?;

        Self::apply_env_overrides(config)
    }

    /// Load the embedded defaults as an untyped tree
    fn load_embedded_defaults() -> Result<Value> {
        let embedded_file = EmbeddedConfigs::get(DEFAULTS_FILE_NAME).ok_or_else(|| {
            Error::config_not_found(format!("Embedded config not found: {}", DEFAULTS_FILE_NAME))
        })?;

        let content = std::str::from_utf8(&embedded_file.data).map_err(|_| {
            Error::invalid_config(format!(
                "Invalid UTF-8 in embedded config: {}",
                DEFAULTS_FILE_NAME
            ))
        })?;

        serde_yaml_ng::from_str(content).map_err(|e| {
            Error::invalid_config(format!(
                "Failed to parse embedded config {}: {}",
                DEFAULTS_FILE_NAME, e
            ))
        })
    }

    /// Load a YAML file as an untyped tree
    fn load_yaml_file(path: &Utf8Path) -> Result<Value> {
        debug!("Loading config file: {}", path);
        let content = fs::read_to_string(path)?;
        serde_yaml_ng::from_str(&content)
            .map_err(|e| Error::invalid_config(format!("Failed to parse {}: {}", path, e)))
    }

    /// Apply EQUILIBRIUM_* environment variable overrides
    fn apply_env_overrides(mut config: EquilibriumConfig) -> Result<EquilibriumConfig> {
        if let Ok(val) = env::var("EQUILIBRIUM_IDENTITY_CHECK") {
            config.analysis.identity_check = val.parse().map_err(|_| {
                Error::invalid_config("EQUILIBRIUM_IDENTITY_CHECK must be 'url' or 'name'")
            })?;
        }

        if let Ok(val) = env::var("EQUILIBRIUM_CANONICAL_MAPPING") {
            config.analysis.canonical_mapping = val.parse().map_err(|_| {
                Error::invalid_config("EQUILIBRIUM_CANONICAL_MAPPING must be 'lenient' or 'strict'")
            })?;
        }

        if let Ok(val) = env::var("EQUILIBRIUM_REMEDIATION_TOOL") {
            config.remediation.tool = val;
        }

        if let Ok(val) = env::var("EQUILIBRIUM_REGISTRY_BASE_URL") {
            config.registry.base_url = Some(val);
        }

        if let Ok(val) = env::var("EQUILIBRIUM_REGISTRY_TOKEN") {
            config.registry.token = Some(val);
        }

        if let Ok(val) = env::var("EQUILIBRIUM_REGISTRY_TIMEOUT_SECS") {
            config.registry.timeout_secs = val.parse().map_err(|_| {
                Error::invalid_config("EQUILIBRIUM_REGISTRY_TIMEOUT_SECS must be a valid number")
            })?;
        }

        if let Ok(val) = env::var("EQUILIBRIUM_REGISTRY_CONNECT_TIMEOUT_SECS") {
            config.registry.connect_timeout_secs = val.parse().map_err(|_| {
                Error::invalid_config(
                    "EQUILIBRIUM_REGISTRY_CONNECT_TIMEOUT_SECS must be a valid number",
                )
            })?;
        }

        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Recursively merge `overlay` into `base`; overlay scalars win
fn merge_values(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (_, Value::Null) => {}
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}
