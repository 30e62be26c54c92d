//! Expected command

use super::common;
use crate::cli::ExpectedArgs;
use anyhow::Result;
use camino::Utf8Path;
use equilibrium_core::types::{RepositoryUrl, TagsDocument};
use tracing::info;

/// Derive the mutable tags a repository should publish from its semantic tags
pub async fn run(args: ExpectedArgs, config_path: Option<&Utf8Path>) -> Result<()> {
    let repository = RepositoryUrl::parse(&args.repository_url)?;
    let config = common::load_config(config_path)?;

    let all_tags = common::fetch_tags(&repository, &config.registry).await?;
    let document = TagsDocument::expected(repository, &all_tags);
    info!(
        "{}: {} expected mutable tags",
        document.repository_url,
        document.digests.len()
    );

    common::print_document(&document, args.format, "Expected")
}
