//! Storage abstraction for bookpage content.
//!
//! Provides the [`ContentStorage`] trait that both production backends
//! (`bookpage-storage-sqlite`, `bookpage-storage-sled`) implement, the
//! [`StorageError`] type for infrastructure failures, and, behind the
//! `mock` feature, an in-memory [`MemoryStorage`] for testing trait
//! consumers.

mod error;
#[cfg(any(test, feature = "mock"))]
mod memory;
mod storage;

pub use error::{Result, StorageError, StorageErrorKind};
#[cfg(any(test, feature = "mock"))]
pub use memory::MemoryStorage;
pub use storage::ContentStorage;
