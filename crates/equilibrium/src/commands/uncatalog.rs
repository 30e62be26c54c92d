//! Uncatalog command

use super::common;
use crate::cli::CatalogArgs;
use anyhow::Result;
use equilibrium_core::catalog::{reverse_catalog, Catalog};
use equilibrium_core::schema::{CATALOG, EXPECTED_ACTUAL};

const USAGE: &str = "equilibrium catalog FILE | equilibrium uncatalog";

/// Convert a catalog back to an expected/actual document
pub fn run(args: CatalogArgs) -> Result<()> {
    let input = common::read_input(args.file.as_deref(), USAGE)?;
    let catalog: Catalog =
        common::parse_validated(&input, CATALOG, "input", "Catalog schema validation failed")?;

    let document = reverse_catalog(&catalog);
    common::validate_output(&document, EXPECTED_ACTUAL)?;
    common::print_json(&document)
}
