use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main configuration structure for Sumi-Harvest
///
/// Every section and key is optional; missing values take the defaults
/// below, so an empty file (or no file at all) is a valid configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub fetcher: FetcherConfig,
    pub retry: RetryConfig,
    pub storage: StorageConfig,
    pub input: InputConfig,
}

/// Crawl bounds and pacing
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum number of pages discovered per seed
    #[serde(rename = "max-pages-per-domain")]
    pub max_pages_per_domain: usize,

    /// Minimum time between consecutive requests (seconds)
    #[serde(rename = "request-delay")]
    pub request_delay: f64,
}

impl CrawlerConfig {
    /// The request delay as a `Duration`
    ///
    /// Validation guarantees the value is finite and non-negative.
    pub fn request_delay(&self) -> Duration {
        Duration::try_from_secs_f64(self.request_delay).unwrap_or(Duration::ZERO)
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_pages_per_domain: 50,
            request_delay: 1.0,
        }
    }
}

/// HTTP fetcher configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// Total request timeout (seconds)
    #[serde(rename = "request-timeout")]
    pub request_timeout: u64,

    /// Connection establishment timeout (seconds)
    #[serde(rename = "connect-timeout")]
    pub connect_timeout: u64,

    /// User agent sent to origin servers
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            request_timeout: 15,
            connect_timeout: 10,
            user_agent: "Mozilla/5.0 (compatible; SumiHarvest/1.0)".to_string(),
        }
    }
}

/// Retry policy applied around the fetcher
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Total attempts per URL, including the first (1 disables retry)
    #[serde(rename = "max-attempts")]
    pub max_attempts: u32,

    /// Delay before the second attempt (seconds)
    pub backoff: f64,

    /// Factor applied to the backoff after every further attempt
    #[serde(rename = "backoff-multiplier")]
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 1,
            backoff: 0.5,
            backoff_multiplier: 2.0,
        }
    }
}

/// Content store location
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the SQLite database file
    #[serde(rename = "database-path")]
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: "./harvest.db".to_string(),
        }
    }
}

/// Seed list location
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct InputConfig {
    /// Path to the line-oriented seed URL file
    #[serde(rename = "seeds-path")]
    pub seeds_path: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            seeds_path: "./data/base_urls.txt".to_string(),
        }
    }
}
