//! Configuration module for Sumi-Harvest
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files, environment overrides, and the seed URL list.
//!
//! # Example
//!
//! ```no_run
//! use sumi_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvest.toml")).unwrap();
//! println!("Request delay: {}s", config.crawler.request_delay);
//! ```

mod env;
mod parser;
mod seeds;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, FetcherConfig, InputConfig, RetryConfig, StorageConfig,
};

// Re-export parser functions
pub use env::{
    ENV_DATABASE, ENV_MAX_PAGES_PER_DOMAIN, ENV_REQUEST_DELAY, ENV_REQUEST_TIMEOUT, ENV_SEEDS,
    ENV_USER_AGENT,
};
pub use parser::{compute_config_hash, load_config, load_config_with_hash, load_default_config};
pub use seeds::{load_seed_urls, parse_seed_list};
pub use validation::validate;
