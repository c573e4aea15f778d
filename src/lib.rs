//! Sumi-Harvest: a bounded, idempotent crawl-and-ingest pipeline
//!
//! This crate discovers pages on a fixed set of seed domains, extracts their
//! readable text and persists it in a content-addressed store that can be
//! re-run safely. Downstream indexers read the store; nothing else is shared.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod observer;
pub mod output;
pub mod pipeline;
pub mod scrape;
pub mod storage;
pub mod url;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Sumi-Harvest operations
///
/// Per-URL problems (fetch failures, empty extractions) never surface here;
/// they are counted and logged where they happen. What reaches this type
/// stops the run.
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Failed to read seed file {path}: {source}")]
    SeedFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("No seed URLs found in {0}")]
    NoSeeds(PathBuf),

    #[error("Run cancelled")]
    Cancelled,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid value for environment variable {key}: {value:?}")]
    EnvOverride { key: String, value: String },
}

/// URL-specific errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL: {0}")]
    MissingHost(String),
}

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Crawler, FetchError, Fetcher, PageFetcher, RetryPolicy, Retrying};
pub use extract::{extract_content, ExtractedContent};
pub use observer::{HarvestObserver, TracingObserver};
pub use pipeline::{run_pipeline, RunReport};
pub use scrape::{Orchestrator, ScrapeStats};
pub use storage::{ContentRecord, ContentStore, InMemoryStore, SqliteStore, StoreStats};
pub use url::{canonicalize_url, extract_domain, parse_absolute_url};
