//! `bookpage seed` command implementation.

use std::path::PathBuf;

use clap::{Args, ValueEnum};

use bookpage_config::{Backend, CliSettings, Config};
use bookpage_storage_sled::SledStorage;

use crate::error::CliError;
use crate::output::Output;

/// Backend selection on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum BackendArg {
    Sqlite,
    Sled,
}

impl From<BackendArg> for Backend {
    fn from(value: BackendArg) -> Self {
        match value {
            BackendArg::Sqlite => Self::Sqlite,
            BackendArg::Sled => Self::Sled,
        }
    }
}

/// Arguments for the seed command.
#[derive(Args)]
pub(crate) struct SeedArgs {
    /// Path to configuration file (default: auto-discover bookpage.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Backend to seed (overrides config).
    #[arg(long, value_enum)]
    backend: Option<BackendArg>,

    /// Document store directory (overrides config).
    #[arg(long)]
    data_dir: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl SeedArgs {
    /// Execute the seed command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the store cannot be
    /// opened.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            backend: self.backend.map(Backend::from),
            database_url: None,
            data_dir: self.data_dir,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        match config.storage.backend {
            Backend::Sled => {
                output.info(&format!(
                    "Seeding document store at {}",
                    config.data_dir().display()
                ));
                let storage = SledStorage::open(config.data_dir())?;
                let summary = storage.seed_defaults()?;
                if summary.created() == 0 {
                    output.info("Store already has content; nothing to seed");
                } else {
                    output.success(&format!("Seeded {} record(s)", summary.created()));
                }
            }
            Backend::Sqlite => {
                // The relational backend fills sections from defaults on
                // first update, so there is nothing to pre-create.
                output.info(
                    "The sqlite backend creates sections lazily with defaults; nothing to seed",
                );
            }
        }

        Ok(())
    }
}
