//! Equilibrium CLI - keep mutable container tags in line with semantic versions
//!
//! This is the main entry point for the Equilibrium command-line interface.

mod cli;
mod commands;
mod output;
mod summary;
mod version;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize rustls crypto provider (required for rustls 0.23+)
    // This must be done before any TLS operations
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    let config = cli.config.as_deref();
    match cli.command {
        Commands::Expected(args) => commands::expected::run(args, config).await,
        Commands::Actual(args) => commands::actual::run(args, config).await,
        Commands::Analyze(args) => commands::analyze::run(args, config),
        Commands::Catalog(args) => commands::catalog::run(args),
        Commands::Uncatalog(args) => commands::uncatalog::run(args),
        Commands::Version(args) => commands::version::run(args),
    }
}

/// Initialize tracing on stderr so stdout stays machine-readable
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
