//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the
//! [`ContentStore`] trait. The connection sits behind a mutex so the store
//! can be shared across tasks as `Arc<dyn ContentStore>`.

use crate::storage::schema::initialize_schema;
use crate::storage::traits::{ContentStore, StorageError, StorageResult};
use crate::storage::{content_key, lookup_url, validate_record, ContentRecord, StoreOutcome, StoreStats};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// SQLite storage backend
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

/// Raw column values of a `content` row
struct RawRecord {
    url: String,
    title: String,
    content: String,
    scraped_at: String,
    content_length: i64,
}

impl RawRecord {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            url: row.get(0)?,
            title: row.get(1)?,
            content: row.get(2)?,
            scraped_at: row.get(3)?,
            content_length: row.get(4)?,
        })
    }

    fn into_record(self) -> StorageResult<ContentRecord> {
        let scraped_at = DateTime::parse_from_rfc3339(&self.scraped_at)
            .map_err(|e| {
                StorageError::Serialization(format!(
                    "bad scraped_at {:?} for {}: {}",
                    self.scraped_at, self.url, e
                ))
            })?
            .with_timezone(&Utc);

        Ok(ContentRecord {
            url: self.url,
            title: self.title,
            content: self.content,
            scraped_at,
            content_length: usize::try_from(self.content_length).unwrap_or(0),
        })
    }
}

impl SqliteStore {
    /// Opens (creating if needed) a database file
    ///
    /// Missing parent directories are created.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    pub fn open(path: &Path) -> StorageResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;

        // Configure SQLite for better performance
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        tracing::debug!("Opened content store at {}", path.display());

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Creates an in-memory database
    pub fn open_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> StorageResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StorageError::Poisoned)
    }
}

impl ContentStore for SqliteStore {
    fn ping(&self) -> StorageResult<()> {
        let conn = self.conn()?;
        conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
        Ok(())
    }

    fn is_scraped(&self, url: &str) -> StorageResult<bool> {
        let conn = self.conn()?;
        let found = conn
            .query_row(
                "SELECT 1 FROM scraped_urls WHERE url = ?1",
                params![lookup_url(url)],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    fn store(&self, url: &str, content: &str, title: &str) -> StorageResult<StoreOutcome> {
        let url = validate_record(url, content)?;

        let record = ContentRecord::new(&url, title, content);
        let key = record.key();

        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        // Record first, then index
        tx.execute(
            "INSERT OR IGNORE INTO content (key, url, title, content, scraped_at, content_length)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                key,
                record.url,
                record.title,
                record.content,
                record.scraped_at.to_rfc3339(),
                record.content_length as i64
            ],
        )?;
        let indexed = tx.execute(
            "INSERT OR IGNORE INTO scraped_urls (url) VALUES (?1)",
            params![url],
        )?;

        tx.commit()?;

        Ok(if indexed == 0 {
            StoreOutcome::AlreadyStored
        } else {
            StoreOutcome::Stored
        })
    }

    fn get(&self, url: &str) -> StorageResult<Option<ContentRecord>> {
        let url = lookup_url(url);
        let conn = self.conn()?;
        let raw = conn
            .query_row(
                "SELECT url, title, content, scraped_at, content_length
                 FROM content WHERE key = ?1",
                params![content_key(&url)],
                RawRecord::from_row,
            )
            .optional()?;

        match raw {
            // Guard against a key collision returning someone else's record
            Some(raw) if raw.url == url => Ok(Some(raw.into_record()?)),
            _ => Ok(None),
        }
    }

    fn list_all_urls(&self) -> StorageResult<Vec<String>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT url FROM scraped_urls ORDER BY url")?;
        let urls = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(urls)
    }

    fn stats(&self) -> StorageResult<StoreStats> {
        let conn = self.conn()?;

        let (count, index_bytes): (i64, i64) = conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(LENGTH(CAST(url AS BLOB))), 0) FROM scraped_urls",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        let record_bytes: i64 = conn.query_row(
            "SELECT COALESCE(SUM(
                LENGTH(CAST(key AS BLOB)) + LENGTH(CAST(url AS BLOB)) +
                LENGTH(CAST(title AS BLOB)) + LENGTH(CAST(content AS BLOB)) +
                LENGTH(CAST(scraped_at AS BLOB))
             ), 0) FROM content",
            [],
            |row| row.get(0),
        )?;

        Ok(StoreStats {
            total_scraped_urls: u64::try_from(count).unwrap_or(0),
            storage_bytes_estimate: u64::try_from(index_bytes + record_bytes).unwrap_or(0),
        })
    }

    fn clear_all(&self) -> StorageResult<usize> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM content", [])?;
        let removed = tx.execute("DELETE FROM scraped_urls", [])?;
        tx.commit()?;

        tracing::info!("Cleared {} URLs from the content store", removed);
        Ok(removed)
    }

    fn records(&self) -> StorageResult<Vec<ContentRecord>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT c.url, c.title, c.content, c.scraped_at, c.content_length
             FROM content c JOIN scraped_urls s ON s.url = c.url
             ORDER BY c.url",
        )?;
        let raw = stmt
            .query_map([], RawRecord::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        raw.into_iter().map(RawRecord::into_record).collect()
    }
}
