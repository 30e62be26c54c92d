//! Analyze command

use super::common;
use crate::cli::{AnalyzeArgs, OutputFormat};
use crate::summary;
use anyhow::Result;
use camino::Utf8Path;
use equilibrium_core::schema::ANALYZER_OUTPUT;
use equilibrium_core::IdentityCheck;

/// Compare expected and actual tag files
pub fn run(args: AnalyzeArgs, config_path: Option<&Utf8Path>) -> Result<()> {
    let config = common::load_config(config_path)?;
    let mut differ = config.differ();
    if let Some(identity) = args.identity {
        differ = differ.with_identity_check(IdentityCheck::from(identity));
    }

    let expected = common::load_document(&args.expected, "Expected")?;
    let actual = common::load_document(&args.actual, "Actual")?;

    let report = differ.analyze(&expected, &actual)?;
    common::validate_output(&report, ANALYZER_OUTPUT)?;

    match args.format {
        OutputFormat::Json => common::print_json(&report),
        OutputFormat::Summary => {
            println!("{}", summary::render_analysis(&report));
            Ok(())
        }
    }
}
