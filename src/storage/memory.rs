//! In-memory [`ContentStore`] implementation for tests and dry runs.
//!
//! Records and the index share one `RwLock`, so a store is atomic with
//! respect to every reader.

use std::collections::{BTreeSet, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::storage::traits::{ContentStore, StorageError, StorageResult};
use crate::storage::{content_key, lookup_url, validate_record, ContentRecord, StoreOutcome, StoreStats};

#[derive(Default)]
struct Inner {
    /// Records by content key
    records: HashMap<String, ContentRecord>,
    /// Scraped-URL index
    index: BTreeSet<String>,
}

/// In-memory store, lost when dropped.
#[derive(Default)]
pub struct InMemoryStore {
    inner: RwLock<Inner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StorageResult<RwLockReadGuard<'_, Inner>> {
        self.inner.read().map_err(|_| StorageError::Poisoned)
    }

    fn write(&self) -> StorageResult<RwLockWriteGuard<'_, Inner>> {
        self.inner.write().map_err(|_| StorageError::Poisoned)
    }
}

impl ContentStore for InMemoryStore {
    fn ping(&self) -> StorageResult<()> {
        self.read().map(|_| ())
    }

    fn is_scraped(&self, url: &str) -> StorageResult<bool> {
        Ok(self.read()?.index.contains(&lookup_url(url)))
    }

    fn store(&self, url: &str, content: &str, title: &str) -> StorageResult<StoreOutcome> {
        let url = validate_record(url, content)?;

        let mut inner = self.write()?;
        if inner.index.contains(&url) {
            return Ok(StoreOutcome::AlreadyStored);
        }

        let record = ContentRecord::new(&url, title, content);
        inner.records.entry(record.key()).or_insert(record);
        inner.index.insert(url);
        Ok(StoreOutcome::Stored)
    }

    fn get(&self, url: &str) -> StorageResult<Option<ContentRecord>> {
        let url = lookup_url(url);
        let inner = self.read()?;
        Ok(inner
            .records
            .get(&content_key(&url))
            .filter(|r| r.url == url)
            .cloned())
    }

    fn list_all_urls(&self) -> StorageResult<Vec<String>> {
        Ok(self.read()?.index.iter().cloned().collect())
    }

    fn stats(&self) -> StorageResult<StoreStats> {
        let inner = self.read()?;
        let index_bytes: u64 = inner.index.iter().map(|u| u.len() as u64).sum();
        let record_bytes: u64 = inner.records.values().map(|r| r.estimated_bytes()).sum();

        Ok(StoreStats {
            total_scraped_urls: inner.index.len() as u64,
            storage_bytes_estimate: index_bytes + record_bytes,
        })
    }

    fn clear_all(&self) -> StorageResult<usize> {
        let mut inner = self.write()?;
        let removed = inner.index.len();
        inner.records.clear();
        inner.index.clear();
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_and_get() {
        let store = InMemoryStore::new();
        assert_eq!(
            store.store("https://example.com/", "Body", "Title").unwrap(),
            StoreOutcome::Stored
        );

        let record = store.get("https://example.com/").unwrap().unwrap();
        assert_eq!(record.title, "Title");
        assert_eq!(record.content, "Body");
        assert!(store.is_scraped("https://example.com/").unwrap());
    }

    #[test]
    fn test_second_store_does_not_overwrite() {
        let store = InMemoryStore::new();
        store.store("https://example.com/", "first", "A").unwrap();
        assert_eq!(
            store.store("https://example.com/", "second", "B").unwrap(),
            StoreOutcome::AlreadyStored
        );
        assert_eq!(store.get("https://example.com/").unwrap().unwrap().content, "first");
    }

    #[test]
    fn test_rejects_invalid_input() {
        let store = InMemoryStore::new();
        assert!(store.store("https://example.com/", "", "T").is_err());
        assert!(store.store("relative/path", "text", "T").is_err());
        assert!(store.list_all_urls().unwrap().is_empty());
    }

    #[test]
    fn test_stats_and_clear() {
        let store = InMemoryStore::new();
        assert_eq!(store.stats().unwrap(), StoreStats::default());

        store.store("https://example.com/b", "bb", "").unwrap();
        store.store("https://example.com/a", "a", "").unwrap();

        let stats = store.stats().unwrap();
        assert_eq!(stats.total_scraped_urls, 2);
        assert!(stats.storage_bytes_estimate > 0);
        assert_eq!(
            store.list_all_urls().unwrap(),
            vec!["https://example.com/a", "https://example.com/b"]
        );

        assert_eq!(store.clear_all().unwrap(), 2);
        assert_eq!(store.stats().unwrap(), StoreStats::default());
    }

    #[test]
    fn test_default_records_walks_index() {
        let store = InMemoryStore::new();
        store.store("https://example.com/b", "b", "").unwrap();
        store.store("https://example.com/a", "a", "").unwrap();

        let contents: Vec<_> = store
            .records()
            .unwrap()
            .into_iter()
            .map(|r| r.content)
            .collect();
        assert_eq!(contents, vec!["a", "b"]);
    }

    #[test]
    fn test_urls_are_canonical_at_the_boundary() {
        let store = InMemoryStore::new();
        store
            .store("https://EXAMPLE.com/a#intro", "Body", "Title")
            .unwrap();

        assert_eq!(store.list_all_urls().unwrap(), vec!["https://example.com/a"]);
        assert!(store.is_scraped("https://example.com/a").unwrap());
        assert!(store.is_scraped("https://Example.COM/a").unwrap());
        assert_eq!(
            store.get("https://example.com/a").unwrap().unwrap().url,
            "https://example.com/a"
        );
        assert_eq!(
            store.store("https://example.com/a", "Other", "T").unwrap(),
            StoreOutcome::AlreadyStored
        );
    }
}
