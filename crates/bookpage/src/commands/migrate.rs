//! `bookpage migrate` command implementation.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;

use bookpage_config::{CliSettings, Config};
use bookpage_migrate::Migrator;
use bookpage_storage_sled::SledStorage;
use bookpage_storage_sqlite::SqliteStorage;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the migrate command.
#[derive(Args)]
pub(crate) struct MigrateArgs {
    /// Path to configuration file (default: auto-discover bookpage.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Relational connection string to copy from (overrides config).
    #[arg(long)]
    database_url: Option<String>,

    /// Document store directory to copy into (overrides config).
    #[arg(long)]
    data_dir: Option<String>,

    /// Enable verbose output (show per-row migration logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl MigrateArgs {
    /// Execute the migrate command.
    ///
    /// The migration ignores the configured `storage.backend`; it is the
    /// one operation that talks to both stores at once.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or either store cannot be
    /// opened or read. Individual rows that fail to copy are reported,
    /// not fatal.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            backend: None,
            database_url: self.database_url,
            data_dir: self.data_dir,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.info(&format!("Source: {}", config.storage.database_url));
        output.info(&format!("Destination: {}", config.data_dir().display()));

        let source = SqliteStorage::connect(&config.storage.database_url).await?;
        let dest = SledStorage::open(config.data_dir())?;

        let migrator = Migrator::new(Arc::new(source), Arc::new(dest));
        let report = migrator.run().await?;

        output.separator();
        output.highlight("Migration report");
        for (entity, step) in report.steps() {
            output.info(&format!(
                "{entity:<26} created {:>4}  skipped {:>4}  failed {:>4}",
                step.created, step.skipped, step.failed
            ));
        }
        output.separator();

        if report.total_failed() > 0 {
            output.warning(&format!(
                "{} record(s) failed to copy; fix the cause and re-run (the run is idempotent)",
                report.total_failed()
            ));
        } else {
            output.success(&format!(
                "Done: {} created, {} already present",
                report.total_created(),
                report.total_skipped()
            ));
        }

        Ok(())
    }
}
