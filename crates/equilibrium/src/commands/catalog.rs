//! Catalog command

use super::common;
use crate::cli::CatalogArgs;
use anyhow::Result;
use equilibrium_core::catalog::build_catalog;
use equilibrium_core::schema::{CATALOG, EXPECTED_ACTUAL};
use equilibrium_core::types::TagsDocument;

const USAGE: &str = "equilibrium expected REPOSITORY_URL | equilibrium catalog";

/// Convert an expected/actual document to catalog format
pub fn run(args: CatalogArgs) -> Result<()> {
    let input = common::read_input(args.file.as_deref(), USAGE)?;
    let document: TagsDocument =
        common::parse_validated(&input, EXPECTED_ACTUAL, "input", "Schema validation failed")?;

    let catalog = build_catalog(&document);
    common::validate_output(&catalog, CATALOG)?;
    common::print_json(&catalog)
}
