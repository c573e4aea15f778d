//! Storage module for persisting scraped content
//!
//! This module owns everything that outlives a single run:
//! - The content records, keyed by a hash of their URL
//! - The scraped-URL index, which is the dedup source of truth
//! - SQLite and in-memory backends behind one [`ContentStore`] trait

mod memory;
mod schema;
mod sqlite;
mod traits;

pub use memory::InMemoryStore;
pub use schema::{initialize_schema, SCHEMA_VERSION};
pub use sqlite::SqliteStore;
pub use traits::{ContentStore, StorageError, StorageResult};

use crate::url::parse_absolute_url;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Prefix of every content key
pub const CONTENT_KEY_PREFIX: &str = "content:";

/// One stored page, created once and never overwritten
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub url: String,
    pub title: String,
    pub content: String,
    pub scraped_at: DateTime<Utc>,
    /// Length of `content` in characters
    pub content_length: usize,
}

impl ContentRecord {
    /// Builds a record stamped with the current time
    pub fn new(url: &str, title: &str, content: &str) -> Self {
        Self {
            url: url.to_string(),
            title: title.to_string(),
            content: content.to_string(),
            scraped_at: Utc::now(),
            content_length: content.chars().count(),
        }
    }

    /// The record's content-address key
    pub fn key(&self) -> String {
        content_key(&self.url)
    }

    /// Bytes this record contributes to [`StoreStats::storage_bytes_estimate`]
    pub(crate) fn estimated_bytes(&self) -> u64 {
        (self.key().len()
            + self.url.len()
            + self.title.len()
            + self.content.len()
            + self.scraped_at.to_rfc3339().len()) as u64
    }
}

/// Result of a store call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOutcome {
    /// The URL was new; record and index entry were written
    Stored,
    /// The URL was already indexed; nothing changed
    AlreadyStored,
}

/// Aggregate figures for the whole store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub total_scraped_urls: u64,
    /// Bytes of all index members plus all record fields
    pub storage_bytes_estimate: u64,
}

/// Computes the content-address key for a URL
///
/// `"content:"` followed by the hex encoding of the first 16 bytes of the
/// SHA-256 digest of the URL string. Deterministic across runs and
/// processes.
///
/// # Example
///
/// ```
/// use sumi_harvest::storage::content_key;
///
/// let key = content_key("https://example.com/");
/// assert!(key.starts_with("content:"));
/// assert_eq!(key.len(), "content:".len() + 32);
/// ```
pub fn content_key(url: &str) -> String {
    let digest = Sha256::digest(url.as_bytes());
    format!("{}{}", CONTENT_KEY_PREFIX, hex::encode(&digest[..16]))
}

/// Checks the inputs of a store call before anything is written
///
/// Returns the canonical form of `url`, which is what the record and the
/// index are keyed by.
pub(crate) fn validate_record(url: &str, content: &str) -> StorageResult<String> {
    let canonical = parse_absolute_url(url)
        .map_err(|e| StorageError::InvalidRecord(format!("bad url {:?}: {}", url, e)))?;
    if content.trim().is_empty() {
        return Err(StorageError::InvalidRecord(format!(
            "empty content for {}",
            url
        )));
    }
    Ok(canonical.into())
}

/// Canonical form of `url` for lookups; unparseable input is used as is
pub(crate) fn lookup_url(url: &str) -> String {
    parse_absolute_url(url)
        .map(String::from)
        .unwrap_or_else(|_| url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_key_is_deterministic() {
        assert_eq!(
            content_key("https://example.com/a"),
            content_key("https://example.com/a")
        );
        assert_ne!(
            content_key("https://example.com/a"),
            content_key("https://example.com/b")
        );
    }

    #[test]
    fn test_content_key_format() {
        let key = content_key("https://example.com/");
        let hex_part = key.strip_prefix(CONTENT_KEY_PREFIX).unwrap();
        assert_eq!(hex_part.len(), 32);
        assert!(hex_part.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_content_key_known_value() {
        // First 16 bytes of SHA-256("abc")
        let digest = Sha256::digest(b"abc");
        assert_eq!(
            hex::encode(&digest[..16]),
            "ba7816bf8f01cfea414140de5dae2223"
        );
        assert_eq!(content_key("abc"), "content:ba7816bf8f01cfea414140de5dae2223");
    }

    #[test]
    fn test_record_counts_chars() {
        let record = ContentRecord::new("https://example.com/", "T", "héllo");
        assert_eq!(record.content_length, 5);
        assert_eq!(record.key(), content_key("https://example.com/"));
    }

    #[test]
    fn test_validate_record() {
        assert_eq!(
            validate_record("https://EXAMPLE.com/a#top", "text").unwrap(),
            "https://example.com/a"
        );
        assert!(matches!(
            validate_record("https://example.com/", "  \n "),
            Err(StorageError::InvalidRecord(_))
        ));
        assert!(matches!(
            validate_record("not a url", "text"),
            Err(StorageError::InvalidRecord(_))
        ));
    }

    #[test]
    fn test_lookup_url() {
        assert_eq!(lookup_url("https://Example.com"), "https://example.com/");
        assert_eq!(lookup_url("not a url"), "not a url");
    }
}
