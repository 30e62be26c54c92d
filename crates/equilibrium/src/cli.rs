//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand, ValueEnum};
use equilibrium_core::{IdentityCheck, MappingPolicy};

/// Equilibrium - keep mutable container tags in equilibrium with semantic versions
#[derive(Parser, Debug)]
#[command(name = "equilibrium")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a config file (default: ~/.equilibrium/config.yaml)
    #[arg(short, long, global = true)]
    pub config: Option<Utf8PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Output expected mutable tags derived from semantic version tags
    Expected(ExpectedArgs),

    /// Output mutable tags currently published on the registry
    Actual(ActualArgs),

    /// Compare expected vs actual tags and generate a remediation plan
    Analyze(AnalyzeArgs),

    /// Convert expected/actual tags JSON to catalog format (file or stdin)
    Catalog(CatalogArgs),

    /// Convert catalog JSON back to expected/actual format (file or stdin)
    Uncatalog(CatalogArgs),

    /// Show version information
    Version(VersionArgs),
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// Human-readable tables
    Summary,
}

/// How expected and actual files must identify the repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum IdentityArg {
    /// Same repository URL
    Url,
    /// Same repository name (allows mirrors)
    Name,
}

impl From<IdentityArg> for IdentityCheck {
    fn from(arg: IdentityArg) -> Self {
        match arg {
            IdentityArg::Url => IdentityCheck::Url,
            IdentityArg::Name => IdentityCheck::Name,
        }
    }
}

/// Handling of mutable tags without a matching semantic tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MappingArg {
    /// Leave them out of canonical_versions
    Lenient,
    /// Fail
    Strict,
}

impl From<MappingArg> for MappingPolicy {
    fn from(arg: MappingArg) -> Self {
        match arg {
            MappingArg::Lenient => MappingPolicy::Lenient,
            MappingArg::Strict => MappingPolicy::Strict,
        }
    }
}

#[derive(Args, Debug)]
pub struct ExpectedArgs {
    /// Full repository URL (e.g., gcr.io/project-id/image-name)
    pub repository_url: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

#[derive(Args, Debug)]
pub struct ActualArgs {
    /// Full repository URL (e.g., gcr.io/project-id/image-name)
    pub repository_url: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Mapping policy for tags whose digest has no semantic tag
    #[arg(long, value_enum)]
    pub canonical_mapping: Option<MappingArg>,
}

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Expected tags JSON file
    #[arg(long)]
    pub expected: Utf8PathBuf,

    /// Actual tags JSON file
    #[arg(long)]
    pub actual: Utf8PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Summary)]
    pub format: OutputFormat,

    /// Repository identity check
    #[arg(long, value_enum)]
    pub identity: Option<IdentityArg>,
}

#[derive(Args, Debug)]
pub struct CatalogArgs {
    /// Input JSON file (reads stdin when omitted)
    pub file: Option<Utf8PathBuf>,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_analyze_defaults_to_summary() {
        let cli = Cli::parse_from([
            "equilibrium",
            "analyze",
            "--expected",
            "e.json",
            "--actual",
            "a.json",
        ]);
        match cli.command {
            Commands::Analyze(args) => {
                assert_eq!(args.format, OutputFormat::Summary);
                assert!(args.identity.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_expected_defaults_to_json() {
        let cli = Cli::parse_from(["equilibrium", "-vv", "expected", "gcr.io/proj/app"]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Expected(args) => {
                assert_eq!(args.repository_url, "gcr.io/proj/app");
                assert_eq!(args.format, OutputFormat::Json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_actual_mapping_flag() {
        let cli = Cli::parse_from([
            "equilibrium",
            "actual",
            "gcr.io/proj/app",
            "--canonical-mapping",
            "strict",
        ]);
        match cli.command {
            Commands::Actual(args) => {
                assert_eq!(
                    args.canonical_mapping.map(MappingPolicy::from),
                    Some(MappingPolicy::Strict)
                );
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_unknown_format() {
        let result = Cli::try_parse_from(["equilibrium", "expected", "gcr.io/p/a", "-f", "xml"]);
        assert!(result.is_err());
    }
}
