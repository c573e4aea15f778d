//! Storage traits and error types
//!
//! This module defines the trait interface for storage backends and
//! associated error types.

use crate::storage::{ContentRecord, StoreOutcome, StoreStats};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Storage lock poisoned")]
    Poisoned,

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Content store interface
///
/// Every operation is idempotent and atomic on its own. The scraped-URL
/// index is the source of truth for "already done": a record without an
/// index entry is invisible to `is_scraped`.
pub trait ContentStore: Send + Sync {
    /// Verifies the backing medium is reachable
    fn ping(&self) -> StorageResult<()>;

    /// Returns true if the URL is in the scraped index
    fn is_scraped(&self, url: &str) -> StorageResult<bool>;

    /// Stores a page if its URL is not already indexed
    ///
    /// Writes the record, then the index entry, as one unit. Never
    /// overwrites an existing record. Rejects invalid URLs and empty
    /// content with [`StorageError::InvalidRecord`].
    fn store(&self, url: &str, content: &str, title: &str) -> StorageResult<StoreOutcome>;

    /// Fetches the record for a URL
    fn get(&self, url: &str) -> StorageResult<Option<ContentRecord>>;

    /// Every indexed URL, sorted
    fn list_all_urls(&self) -> StorageResult<Vec<String>>;

    /// Counts and size estimate
    fn stats(&self) -> StorageResult<StoreStats>;

    /// Deletes every record and index entry, returning how many URLs were
    /// indexed
    fn clear_all(&self) -> StorageResult<usize>;

    /// Every indexed record, sorted by URL
    fn records(&self) -> StorageResult<Vec<ContentRecord>> {
        let mut records = Vec::new();
        for url in self.list_all_urls()? {
            if let Some(record) = self.get(&url)? {
                records.push(record);
            }
        }
        Ok(records)
    }
}
