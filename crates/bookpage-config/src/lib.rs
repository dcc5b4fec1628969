//! Configuration management for bookpage.
//!
//! Parses `bookpage.toml` with serde and provides auto-discovery of the
//! config file in parent directories. The storage backend is chosen here,
//! once, at load time; there is no runtime backend switching.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! `storage.database_url` supports environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! `storage.data_dir` supports `~` expansion.

mod expand;

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "bookpage.toml";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded
/// config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the storage backend.
    pub backend: Option<Backend>,
    /// Override the relational connection string.
    pub database_url: Option<String>,
    /// Override the document store directory.
    pub data_dir: Option<String>,
}

/// Which storage backend serves this process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Relational backend (SQLite via sqlx).
    Sqlite,
    /// Document backend (sled).
    Sled,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Storage configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Active backend for this process.
    pub backend: Backend,
    /// SQLite connection string (sqlite backend).
    pub database_url: String,
    /// Document store directory (sled backend). `~` is expanded.
    pub data_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Sqlite,
            database_url: "sqlite:bookpage.db".to_owned(),
            data_dir: ".bookpage/data".to_owned(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g. `storage.database_url`).
        field: String,
        /// Error message (e.g. "${`DATABASE_URL`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise,
    /// searches for `bookpage.toml` in the current directory and parents,
    /// falling back to defaults when no file exists.
    ///
    /// CLI settings are applied after loading, so CLI arguments take
    /// precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit `config_path` doesn't exist,
    /// parsing fails, env expansion fails, or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// The document store directory with `~` expanded.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.storage.data_dir).into_owned())
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(backend) = settings.backend {
            self.storage.backend = backend;
        }
        if let Some(database_url) = &settings.database_url {
            self.storage.database_url.clone_from(database_url);
        }
        if let Some(data_dir) = &settings.data_dir {
            self.storage.data_dir.clone_from(data_dir);
        }
    }

    /// Search for the config file in the current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.storage.database_url =
            expand::expand_env(&self.storage.database_url, "storage.database_url")?;
        Ok(())
    }

    /// Validate configuration values.
    ///
    /// The location field of the *selected* backend must be usable; the
    /// other backend's field is ignored.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.storage.backend {
            Backend::Sqlite => {
                require_non_empty(&self.storage.database_url, "storage.database_url")?;
                if !self.storage.database_url.starts_with("sqlite:") {
                    return Err(ConfigError::Validation(
                        "storage.database_url must start with sqlite:".to_owned(),
                    ));
                }
            }
            Backend::Sled => {
                require_non_empty(&self.storage.data_dir, "storage.data_dir")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.storage.backend, Backend::Sqlite);
        assert_eq!(config.storage.database_url, "sqlite:bookpage.db");
        assert_eq!(config.storage.data_dir, ".bookpage/data");
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let toml = "";
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.storage.backend, Backend::Sqlite);
    }

    #[test]
    fn test_parse_storage_config() {
        let toml = r#"
[storage]
backend = "sled"
data_dir = "/var/lib/bookpage"
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.storage.backend, Backend::Sled);
        assert_eq!(config.storage.data_dir, "/var/lib/bookpage");
        // Unspecified fields keep defaults.
        assert_eq!(config.storage.database_url, "sqlite:bookpage.db");
    }

    #[test]
    fn test_unknown_backend_fails_to_parse() {
        let toml = r#"
[storage]
backend = "mongodb"
"#;
        assert!(toml::from_str::<Config>(toml).is_err());
    }

    #[test]
    fn test_expand_env_vars_database_url() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("BOOKPAGE_TEST_DB", "sqlite:/tmp/test.db");
        }

        let toml = r#"
[storage]
database_url = "${BOOKPAGE_TEST_DB}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(config.storage.database_url, "sqlite:/tmp/test.db");

        unsafe {
            std::env::remove_var("BOOKPAGE_TEST_DB");
        }
    }

    #[test]
    fn test_data_dir_tilde_expansion() {
        let toml = r#"
[storage]
data_dir = "~/bookpage-data"
"#;
        let config: Config = toml::from_str(toml).unwrap();

        let resolved = config.data_dir();
        assert!(!resolved.to_string_lossy().starts_with('~'));
        assert!(resolved.to_string_lossy().ends_with("bookpage-data"));
    }

    #[test]
    fn test_validate_sqlite_requires_url_scheme() {
        let mut config = Config::default();
        config.storage.database_url = "postgres://localhost".to_owned();

        let err = config.validate().unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("sqlite:"));
    }

    #[test]
    fn test_validate_sled_requires_data_dir() {
        let mut config = Config::default();
        config.storage.backend = Backend::Sled;
        config.storage.data_dir = String::new();

        let err = config.validate().unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("data_dir"));
    }

    #[test]
    fn test_validate_ignores_unselected_backend_field() {
        let mut config = Config::default();
        config.storage.backend = Backend::Sled;
        // Bogus database_url is fine while the sled backend is selected.
        config.storage.database_url = String::new();

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default();
        let overrides = CliSettings {
            backend: Some(Backend::Sled),
            database_url: Some("sqlite:elsewhere.db".to_owned()),
            data_dir: Some("/custom".to_owned()),
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.storage.backend, Backend::Sled);
        assert_eq!(config.storage.database_url, "sqlite:elsewhere.db");
        assert_eq!(config.storage.data_dir, "/custom");
    }

    #[test]
    fn test_apply_cli_settings_empty_changes_nothing() {
        let mut config = Config::default();

        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(config.storage.backend, Backend::Sqlite);
        assert_eq!(config.storage.database_url, "sqlite:bookpage.db");
    }

    #[test]
    fn test_load_missing_explicit_path_errors() {
        let err = Config::load(Some(Path::new("/nonexistent/bookpage.toml")), None)
            .unwrap_err();

        assert!(matches!(err, ConfigError::NotFound(_)));
    }
}
