//! Expected vs. actual mutable tag reconciliation

use crate::error::{Error, Result};
use crate::sort::{serialize_descending, sorted_tags};
use crate::types::{Digest, RepositoryUrl, TagDigestMap, TagsDocument};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

/// Default prefix for remediation commands
pub const DEFAULT_REMEDIATION_TOOL: &str = "gcloud container images";

/// Overall reconciliation outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffStatus {
    /// Expected and actual are identical
    Perfect,
    /// Some expected tags are not published
    MissingTags,
    /// Some tags point to the wrong digest
    Mismatched,
    /// Some published tags are not expected
    ExtraTags,
}

impl DiffStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Perfect => "perfect",
            Self::MissingTags => "missing_tags",
            Self::Mismatched => "mismatched",
            Self::ExtraTags => "extra_tags",
        }
    }

    pub fn is_perfect(&self) -> bool {
        matches!(self, Self::Perfect)
    }
}

impl fmt::Display for DiffStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Both sides of a tag that exists everywhere but differs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MismatchedDigests {
    pub expected: Digest,
    pub actual: Digest,
}

/// One registry mutation needed to reach equilibrium
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum RemediationAction {
    CreateTag {
        tag: String,
        digest: Digest,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        command: Option<String>,
    },
    UpdateTag {
        tag: String,
        old_digest: Digest,
        new_digest: Digest,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        command: Option<String>,
    },
    RemoveTag {
        tag: String,
        digest: Digest,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        command: Option<String>,
    },
}

impl RemediationAction {
    pub fn tag(&self) -> &str {
        match self {
            Self::CreateTag { tag, .. } | Self::UpdateTag { tag, .. } | Self::RemoveTag { tag, .. } => {
                tag
            }
        }
    }

    pub fn command(&self) -> Option<&str> {
        match self {
            Self::CreateTag { command, .. }
            | Self::UpdateTag { command, .. }
            | Self::RemoveTag { command, .. } => command.as_deref(),
        }
    }
}

/// Differences between an expected and an actual tag set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffResult {
    /// In expected, absent from actual (expected digest)
    #[serde(serialize_with = "serialize_descending")]
    pub missing_tags: TagDigestMap,
    /// In actual, absent from expected (actual digest)
    #[serde(serialize_with = "serialize_descending")]
    pub unexpected_tags: TagDigestMap,
    /// In both with differing digests
    #[serde(serialize_with = "serialize_descending")]
    pub mismatched_tags: BTreeMap<String, MismatchedDigests>,
    pub status: DiffStatus,
    pub remediation_plan: Vec<RemediationAction>,
}

/// How expected and actual documents must agree on repository identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IdentityCheck {
    /// Compare `repository_url`
    #[default]
    Url,
    /// Compare `repository_name` only
    Name,
}

impl FromStr for IdentityCheck {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "url" => Ok(Self::Url),
            "name" => Ok(Self::Name),
            other => Err(Error::invalid_config(format!(
                "Unknown identity check '{}' (expected url or name)",
                other
            ))),
        }
    }
}

impl fmt::Display for IdentityCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url => f.write_str("url"),
            Self::Name => f.write_str("name"),
        }
    }
}

/// Output of `analyze`: a diff plus repository metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub repository_url: RepositoryUrl,
    pub repository_name: String,
    pub expected_count: usize,
    pub actual_count: usize,
    #[serde(flatten)]
    pub diff: DiffResult,
}

/// Compares expected and actual mutable tags and plans remediation
#[derive(Debug, Clone)]
pub struct RegistryDiffer {
    identity_check: IdentityCheck,
    remediation_tool: String,
}

impl Default for RegistryDiffer {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryDiffer {
    pub fn new() -> Self {
        Self {
            identity_check: IdentityCheck::default(),
            remediation_tool: DEFAULT_REMEDIATION_TOOL.to_string(),
        }
    }

    /// Choose whether repository identity is checked by URL or by name
    pub fn with_identity_check(mut self, identity_check: IdentityCheck) -> Self {
        self.identity_check = identity_check;
        self
    }

    /// Set the command prefix used in remediation commands
    pub fn with_remediation_tool(mut self, tool: impl Into<String>) -> Self {
        self.remediation_tool = tool.into();
        self
    }

    pub fn identity_check(&self) -> IdentityCheck {
        self.identity_check
    }

    /// Classify differences between two tag sets
    ///
    /// The remediation plan of the returned diff carries no commands; use
    /// [`RegistryDiffer::build_remediation_plan`] with a repository for those.
    pub fn diff(expected: &TagDigestMap, actual: &TagDigestMap) -> DiffResult {
        let missing_tags: TagDigestMap = expected
            .iter()
            .filter(|(tag, _)| !actual.contains_key(*tag))
            .map(|(tag, digest)| (tag.clone(), digest.clone()))
            .collect();

        let unexpected_tags: TagDigestMap = actual
            .iter()
            .filter(|(tag, _)| !expected.contains_key(*tag))
            .map(|(tag, digest)| (tag.clone(), digest.clone()))
            .collect();

        let mismatched_tags: BTreeMap<String, MismatchedDigests> = expected
            .iter()
            .filter_map(|(tag, expected_digest)| {
                let actual_digest = actual.get(tag)?;
                (actual_digest != expected_digest).then(|| {
                    (
                        tag.clone(),
                        MismatchedDigests {
                            expected: expected_digest.clone(),
                            actual: actual_digest.clone(),
                        },
                    )
                })
            })
            .collect();

        // Mismatches dominate: wrong content being served is the most urgent
        let status = if expected == actual {
            DiffStatus::Perfect
        } else if !mismatched_tags.is_empty() {
            DiffStatus::Mismatched
        } else if !missing_tags.is_empty() {
            DiffStatus::MissingTags
        } else if !unexpected_tags.is_empty() {
            DiffStatus::ExtraTags
        } else {
            DiffStatus::Perfect
        };

        debug!(
            "Diff: {} missing, {} unexpected, {} mismatched -> {}",
            missing_tags.len(),
            unexpected_tags.len(),
            mismatched_tags.len(),
            status
        );

        let mut result = DiffResult {
            missing_tags,
            unexpected_tags,
            mismatched_tags,
            status,
            remediation_plan: Vec::new(),
        };
        result.remediation_plan = Self::default().build_remediation_plan(&result, None);
        result
    }

    /// Ordered actions: all creates, then all updates, then all removals
    ///
    /// Commands are only rendered when a repository is known.
    pub fn build_remediation_plan(
        &self,
        diff: &DiffResult,
        repository: Option<&str>,
    ) -> Vec<RemediationAction> {
        let mut plan = Vec::with_capacity(
            diff.missing_tags.len() + diff.mismatched_tags.len() + diff.unexpected_tags.len(),
        );

        for tag in sorted_tags(diff.missing_tags.keys()) {
            let digest = &diff.missing_tags[tag];
            plan.push(RemediationAction::CreateTag {
                tag: tag.to_string(),
                digest: digest.clone(),
                command: repository.map(|repo| self.add_tag_command(repo, digest, tag)),
            });
        }

        for tag in sorted_tags(diff.mismatched_tags.keys()) {
            let digests = &diff.mismatched_tags[tag];
            plan.push(RemediationAction::UpdateTag {
                tag: tag.to_string(),
                old_digest: digests.actual.clone(),
                new_digest: digests.expected.clone(),
                command: repository.map(|repo| self.add_tag_command(repo, &digests.expected, tag)),
            });
        }

        for tag in sorted_tags(diff.unexpected_tags.keys()) {
            plan.push(RemediationAction::RemoveTag {
                tag: tag.to_string(),
                digest: diff.unexpected_tags[tag].clone(),
                command: repository.map(|repo| self.untag_command(repo, tag)),
            });
        }

        plan
    }

    /// Check repository identity, diff, and plan remediation with commands
    pub fn analyze(&self, expected: &TagsDocument, actual: &TagsDocument) -> Result<AnalysisReport> {
        self.check_identity(expected, actual)?;

        let mut diff = Self::diff(&expected.digests, &actual.digests);
        diff.remediation_plan =
            self.build_remediation_plan(&diff, Some(&expected.repository_url.to_string()));

        info!(
            "{}: {} ({} expected, {} actual, {} actions)",
            expected.repository_url,
            diff.status,
            expected.digests.len(),
            actual.digests.len(),
            diff.remediation_plan.len()
        );

        Ok(AnalysisReport {
            repository_url: expected.repository_url.clone(),
            repository_name: expected.repository_name.clone(),
            expected_count: expected.digests.len(),
            actual_count: actual.digests.len(),
            diff,
        })
    }

    fn check_identity(&self, expected: &TagsDocument, actual: &TagsDocument) -> Result<()> {
        match self.identity_check {
            IdentityCheck::Url if expected.repository_url != actual.repository_url => {
                Err(Error::repository_mismatch(
                    "URL",
                    expected.repository_url.to_string(),
                    actual.repository_url.to_string(),
                ))
            }
            IdentityCheck::Name if expected.repository_name != actual.repository_name => {
                Err(Error::repository_mismatch(
                    "name",
                    &expected.repository_name,
                    &actual.repository_name,
                ))
            }
            _ => Ok(()),
        }
    }

    fn add_tag_command(&self, repository: &str, digest: &Digest, tag: &str) -> String {
        format!(
            "{} add-tag {}@{} {}:{}",
            self.remediation_tool, repository, digest, repository, tag
        )
    }

    fn untag_command(&self, repository: &str, tag: &str) -> String {
        format!("{} untag {}:{}", self.remediation_tool, repository, tag)
    }
}
