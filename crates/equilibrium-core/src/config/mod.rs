//! Configuration loading and management

mod loader;

pub use loader::{ConfigLoader, CONFIG_FILE_NAME};

use crate::canonical::MappingPolicy;
use crate::diff::{IdentityCheck, RegistryDiffer, DEFAULT_REMEDIATION_TOOL};
use serde::{Deserialize, Serialize};

/// Complete runtime configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EquilibriumConfig {
    pub analysis: AnalysisConfig,
    pub remediation: RemediationConfig,
    pub registry: RegistryConfig,
}

impl EquilibriumConfig {
    /// Differ configured with this identity check and remediation tool
    pub fn differ(&self) -> RegistryDiffer {
        RegistryDiffer::new()
            .with_identity_check(self.analysis.identity_check)
            .with_remediation_tool(&self.remediation.tool)
    }
}

/// How documents are compared and mapped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalysisConfig {
    pub identity_check: IdentityCheck,
    pub canonical_mapping: MappingPolicy,
}

/// Remediation command rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemediationConfig {
    /// Prefix of every generated command
    pub tool: String,
}

impl Default for RemediationConfig {
    fn default() -> Self {
        Self {
            tool: DEFAULT_REMEDIATION_TOOL.to_string(),
        }
    }
}

/// Registry HTTP settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Replaces `https://<host>` of the repository URL
    pub base_url: Option<String>,
    /// Bearer token sent with every request
    pub token: Option<String>,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            token: None,
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}
