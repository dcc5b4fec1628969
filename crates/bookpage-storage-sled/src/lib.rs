//! Document storage backend for bookpage content.
//!
//! Implements the `ContentStorage` contract over an embedded sled
//! database. Every entity type lives in its own named tree; values are
//! camelCase JSON documents (the serde representation of the
//! `bookpage-content` types), keys are opaque UUID strings for collection
//! entities and a fixed well-known key for singleton sections.
//!
//! Singleton updates are find-or-create against the fixed key: the stored
//! document is deserialized, patched and written back, or constructed
//! from the shared defaults when absent. Collection lookups validate the
//! id parses as a UUID before touching the tree; a malformed id from a
//! routing parameter is not-found, never a storage error.

mod repository;
mod seed;
mod trees;

use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use bookpage_storage::{Result, StorageError, StorageErrorKind};

pub use seed::SeedSummary;

/// Backend identifier used in error context.
const BACKEND: &str = "Sled";

/// Fixed key under which a singleton section document is stored.
const SINGLETON_KEY: &str = "section";

/// Sled implementation of the content storage contract.
#[derive(Debug, Clone)]
pub struct SledStorage {
    db: sled::Db,
}

/// Map a sled failure to a storage error, logging at the call site.
fn io_err(err: sled::Error, entity: &'static str) -> StorageError {
    tracing::error!(entity, error = %err, "sled operation failed");
    StorageError::new(StorageErrorKind::Io)
        .with_backend(BACKEND)
        .with_context(entity)
        .with_source(err)
}

/// Map a serialization failure on stored data to a storage error.
fn corrupt_err(err: serde_json::Error, entity: &'static str) -> StorageError {
    tracing::error!(entity, error = %err, "stored document no longer parses");
    StorageError::new(StorageErrorKind::Corrupt)
        .with_backend(BACKEND)
        .with_context(entity)
        .with_source(err)
}

/// Validate a contract-level id as a UUID, returning the canonical
/// hyphenated key. `None` means the id cannot refer to any document.
fn valid_id(id: &str) -> Option<String> {
    Uuid::parse_str(id).ok().map(|u| u.to_string())
}

impl SledStorage {
    /// Open (or create) the database at `path`.
    ///
    /// # Errors
    ///
    /// Returns a `Connection` error when the database directory cannot be
    /// opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let config = sled::Config::new()
            .path(path.as_ref())
            .mode(sled::Mode::HighThroughput)
            .flush_every_ms(Some(1000));

        let db = config.open().map_err(|e| {
            StorageError::new(StorageErrorKind::Connection)
                .with_backend(BACKEND)
                .with_source(e)
        })?;

        tracing::debug!(path = %path.as_ref().display(), "sled database ready");
        Ok(Self { db })
    }

    pub(crate) fn tree(&self, name: &'static str) -> Result<sled::Tree> {
        self.db.open_tree(name).map_err(|e| io_err(e, name))
    }

    /// Read the singleton document of a tree, if present.
    pub(crate) fn read_singleton<T: DeserializeOwned>(
        &self,
        tree: &'static str,
    ) -> Result<Option<T>> {
        self.tree(tree)?
            .get(SINGLETON_KEY)
            .map_err(|e| io_err(e, tree))?
            .map(|bytes| serde_json::from_slice(&bytes).map_err(|e| corrupt_err(e, tree)))
            .transpose()
    }

    /// Write the singleton document of a tree.
    pub(crate) fn write_singleton<T: Serialize>(
        &self,
        tree: &'static str,
        value: &T,
    ) -> Result<()> {
        let json = serde_json::to_vec(value).map_err(|e| corrupt_err(e, tree))?;
        let t = self.tree(tree)?;
        t.insert(SINGLETON_KEY, json).map_err(|e| io_err(e, tree))?;
        t.flush().map_err(|e| io_err(e, tree))?;
        Ok(())
    }

    /// Read every document of a tree, in key order.
    pub(crate) fn read_all<T: DeserializeOwned>(&self, tree: &'static str) -> Result<Vec<T>> {
        let t = self.tree(tree)?;
        let mut items = Vec::new();
        for entry in t.iter() {
            let (_, value) = entry.map_err(|e| io_err(e, tree))?;
            items.push(serde_json::from_slice(&value).map_err(|e| corrupt_err(e, tree))?);
        }
        Ok(items)
    }

    /// Read one document by contract id. An id that is not a UUID is
    /// not-found by definition.
    pub(crate) fn read_by_id<T: DeserializeOwned>(
        &self,
        tree: &'static str,
        id: &str,
    ) -> Result<Option<T>> {
        let Some(key) = valid_id(id) else {
            return Ok(None);
        };
        self.tree(tree)?
            .get(key.as_bytes())
            .map_err(|e| io_err(e, tree))?
            .map(|bytes| serde_json::from_slice(&bytes).map_err(|e| corrupt_err(e, tree)))
            .transpose()
    }

    /// Write one document under its id.
    pub(crate) fn write_doc<T: Serialize>(
        &self,
        tree: &'static str,
        id: &str,
        value: &T,
    ) -> Result<()> {
        let json = serde_json::to_vec(value).map_err(|e| corrupt_err(e, tree))?;
        let t = self.tree(tree)?;
        t.insert(id.as_bytes(), json).map_err(|e| io_err(e, tree))?;
        t.flush().map_err(|e| io_err(e, tree))?;
        Ok(())
    }

    /// Remove one document by contract id; `false` when absent or the id
    /// is not a UUID.
    pub(crate) fn remove_doc(&self, tree: &'static str, id: &str) -> Result<bool> {
        let Some(key) = valid_id(id) else {
            return Ok(false);
        };
        let t = self.tree(tree)?;
        let removed = t
            .remove(key.as_bytes())
            .map_err(|e| io_err(e, tree))?
            .is_some();
        if removed {
            t.flush().map_err(|e| io_err(e, tree))?;
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_id_accepts_uuid() {
        let id = Uuid::new_v4().to_string();

        assert_eq!(valid_id(&id), Some(id));
    }

    #[test]
    fn test_valid_id_rejects_garbage() {
        assert_eq!(valid_id("42"), None);
        assert_eq!(valid_id("not-a-uuid"), None);
        assert_eq!(valid_id(""), None);
    }

    #[test]
    fn test_open_creates_database() {
        let dir = tempfile::TempDir::new().unwrap();

        let storage = SledStorage::open(dir.path().join("content")).unwrap();

        assert!(storage.tree("hero").is_ok());
    }
}
