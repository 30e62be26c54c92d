//! Build metadata reported by `equilibrium version`

use serde::{Deserialize, Serialize};
use std::fmt;

/// One-line description printed under the version
pub const TAGLINE: &str = "Container tag validation tool";

/// Version and build metadata baked in by `build.rs`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    pub version: String,

    /// Short git SHA
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_date: Option<String>,

    /// Target triple
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl VersionInfo {
    pub fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            commit: option_env!("GIT_SHA").map(String::from),
            build_date: option_env!("BUILD_DATE").map(String::from),
            target: option_env!("TARGET").map(String::from),
        }
    }

    /// `equilibrium 1.2.3 (abc1234, x86_64-unknown-linux-gnu)`
    pub fn display(&self) -> String {
        let build: Vec<&str> = [self.commit.as_deref(), self.target.as_deref()]
            .into_iter()
            .flatten()
            .collect();

        if build.is_empty() {
            format!("equilibrium {}", self.version)
        } else {
            format!("equilibrium {} ({})", self.version, build.join(", "))
        }
    }

    /// Text output of the version command
    pub fn report(&self) -> String {
        let mut report = format!("{}\n{}", self.display(), TAGLINE);
        if let Some(date) = &self.build_date {
            report.push_str(&format!("\nBuilt {}", date));
        }
        report
    }
}

impl fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}
