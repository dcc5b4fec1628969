//! Storage error type shared by every backend.
//!
//! Absence is never an error in this contract: lookups that find nothing
//! return `Ok(None)`, mutations on a missing id return `Ok(None)` or
//! `Ok(false)`. [`StorageError`] only carries infrastructure failures:
//! a connection that cannot be opened, a query that fails, a stored
//! document that no longer parses.

/// Semantic error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// Backing store could not be opened or reached.
    Connection,
    /// A query or write against the backing store failed.
    Query,
    /// Stored data exists but no longer parses (bad JSON, bad timestamp).
    Corrupt,
    /// Underlying I/O failure.
    Io,
    /// Other/unknown error category.
    Other,
}

/// Storage error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct StorageError {
    kind: StorageErrorKind,
    backend: Option<&'static str>,
    context: Option<String>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StorageError {
    /// Create a new storage error.
    #[must_use]
    pub fn new(kind: StorageErrorKind) -> Self {
        Self {
            kind,
            backend: None,
            context: None,
            source: None,
        }
    }

    /// Attach backend identifier (e.g. "Sqlite", "Sled").
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach context, typically the entity or operation involved.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Semantic error category.
    #[must_use]
    pub fn kind(&self) -> StorageErrorKind {
        self.kind
    }

    /// Backend identifier, if attached.
    #[must_use]
    pub fn backend(&self) -> Option<&'static str> {
        self.backend
    }

    /// Create a corrupt-data error for an entity.
    #[must_use]
    pub fn corrupt(context: impl Into<String>) -> Self {
        Self::new(StorageErrorKind::Corrupt).with_context(context)
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: source (context)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            StorageErrorKind::Connection => "Connection failed",
            StorageErrorKind::Query => "Query failed",
            StorageErrorKind::Corrupt => "Corrupt data",
            StorageErrorKind::Io => "I/O error",
            StorageErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(context) = &self.context {
            write!(f, " ({context})")?;
        }

        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Result alias used throughout the storage contract.
pub type Result<T> = std::result::Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_simple() {
        let err = StorageError::new(StorageErrorKind::Query);

        assert_eq!(err.to_string(), "Query failed");
    }

    #[test]
    fn test_display_with_backend_and_context() {
        let err = StorageError::new(StorageErrorKind::Corrupt)
            .with_backend("Sled")
            .with_context("testimonial");

        assert_eq!(err.to_string(), "[Sled] Corrupt data (testimonial)");
    }

    #[test]
    fn test_display_full() {
        let io_err = std::io::Error::other("disk gone");
        let err = StorageError::new(StorageErrorKind::Io)
            .with_backend("Sled")
            .with_context("hero")
            .with_source(io_err);

        assert_eq!(err.to_string(), "[Sled] I/O error: disk gone (hero)");
    }

    #[test]
    fn test_source_is_preserved() {
        let io_err = std::io::Error::other("disk gone");
        let err = StorageError::new(StorageErrorKind::Io).with_source(io_err);

        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StorageError>();
    }
}
