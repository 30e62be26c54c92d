//! Actual command

use super::common;
use crate::cli::ActualArgs;
use anyhow::Result;
use camino::Utf8Path;
use equilibrium_core::types::{RepositoryUrl, TagsDocument};
use equilibrium_core::MappingPolicy;
use tracing::info;

/// Report the mutable tags a repository currently publishes
pub async fn run(args: ActualArgs, config_path: Option<&Utf8Path>) -> Result<()> {
    let repository = RepositoryUrl::parse(&args.repository_url)?;
    let config = common::load_config(config_path)?;
    let policy = args
        .canonical_mapping
        .map(MappingPolicy::from)
        .unwrap_or(config.analysis.canonical_mapping);

    let all_tags = common::fetch_tags(&repository, &config.registry).await?;
    let document = TagsDocument::actual(repository, &all_tags, policy)?;
    info!(
        "{}: {} published mutable tags ({} mapping)",
        document.repository_url,
        document.digests.len(),
        policy
    );

    common::print_document(&document, args.format, "Actual")
}
