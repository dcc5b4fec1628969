//! Relational storage backend for bookpage content.
//!
//! Implements the `ContentStorage` contract against SQLite via sqlx,
//! using hand-written parameterized queries with explicit column lists.
//! Columns are snake_case; the mapping to contract types goes through
//! per-entity row structs rather than any automatic ORM layer.
//!
//! Singleton sections use update-or-insert: the update path patches the
//! existing row with `COALESCE(?, column)` per field so callers can send
//! partial updates, the insert path fills omitted fields from the shared
//! defaults in `bookpage-content`. Collection rows use `INTEGER PRIMARY
//! KEY` ids, exposed through the contract as decimal strings; an id that
//! does not parse as an integer is reported as not-found without touching
//! the database.

mod repository;
mod rows;
mod schema;

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqliteSynchronous};

use bookpage_storage::{StorageError, StorageErrorKind};

/// Backend identifier used in error context.
const BACKEND: &str = "Sqlite";

/// SQLite implementation of the content storage contract.
#[derive(Debug, Clone)]
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    /// Connect to the database and ensure the schema exists.
    ///
    /// `database_url` is a SQLite connection string (e.g.
    /// `sqlite:bookpage.db`). The database file is created when missing;
    /// WAL journaling is enabled for concurrent readers.
    ///
    /// # Errors
    ///
    /// Returns a `Connection` error when the URL is invalid or the
    /// database cannot be opened, and a `Query` error when the schema
    /// statements fail.
    pub async fn connect(database_url: &str) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| {
                StorageError::new(StorageErrorKind::Connection)
                    .with_backend(BACKEND)
                    .with_context("invalid database URL")
                    .with_source(e)
            })?
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .create_if_missing(true);

        let pool = SqlitePool::connect_with(options).await.map_err(|e| {
            StorageError::new(StorageErrorKind::Connection)
                .with_backend(BACKEND)
                .with_source(e)
        })?;

        sqlx::raw_sql(schema::SCHEMA)
            .execute(&pool)
            .await
            .map_err(|e| {
                StorageError::new(StorageErrorKind::Query)
                    .with_backend(BACKEND)
                    .with_context("schema init")
                    .with_source(e)
            })?;

        tracing::debug!("sqlite pool ready");
        Ok(Self { pool })
    }

    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
