//! Database schema definitions
//!
//! Two tables mirror the logical layout of the store: the scraped-URL
//! index and the content records keyed by URL hash.

/// Current schema version, stored in `PRAGMA user_version`
pub const SCHEMA_VERSION: u32 = 1;

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- Global index of scraped URLs
CREATE TABLE IF NOT EXISTS scraped_urls (
    url TEXT PRIMARY KEY
);

-- Content records, one per URL, keyed by content:<hash>
CREATE TABLE IF NOT EXISTS content (
    key TEXT PRIMARY KEY,
    url TEXT NOT NULL,
    title TEXT NOT NULL,
    content TEXT NOT NULL,
    scraped_at TEXT NOT NULL,
    content_length INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_content_url ON content(url);
"#;

/// Initializes the database schema
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Returns
///
/// * `Ok(())` - Schema initialized successfully
/// * `Err(rusqlite::Error)` - Failed to initialize schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    Ok(())
}
