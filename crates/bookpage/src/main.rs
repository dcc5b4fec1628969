//! Bookpage CLI - content storage tooling.
//!
//! Provides commands for:
//! - `migrate`: Copy content from the relational store to the document store
//! - `seed`: Insert deterministic baseline content into the configured backend

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{MigrateArgs, SeedArgs};
use output::Output;

/// Bookpage - landing site content tooling.
#[derive(Parser)]
#[command(name = "bookpage", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Copy content from the relational store to the document store.
    Migrate(MigrateArgs),
    /// Seed deterministic baseline content.
    Seed(SeedArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = match &cli.command {
        Commands::Migrate(args) => args.verbose,
        Commands::Seed(args) => args.verbose,
    };

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
    let result = match cli.command {
        Commands::Migrate(args) => rt.block_on(args.execute()),
        Commands::Seed(args) => rt.block_on(args.execute()),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
