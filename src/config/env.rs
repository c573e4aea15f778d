//! Environment variable overrides
//!
//! The pipeline is often launched from a container or a cron entry where
//! editing a TOML file is awkward, so a handful of keys can be overridden
//! from the process environment.

use crate::config::types::Config;
use crate::ConfigError;
use std::str::FromStr;

pub const ENV_USER_AGENT: &str = "HARVEST_USER_AGENT";
pub const ENV_MAX_PAGES_PER_DOMAIN: &str = "HARVEST_MAX_PAGES_PER_DOMAIN";
pub const ENV_REQUEST_DELAY: &str = "HARVEST_REQUEST_DELAY";
pub const ENV_REQUEST_TIMEOUT: &str = "HARVEST_REQUEST_TIMEOUT";
pub const ENV_DATABASE: &str = "HARVEST_DATABASE";
pub const ENV_SEEDS: &str = "HARVEST_SEEDS";

impl Config {
    /// Applies overrides looked up through `lookup`
    ///
    /// `lookup` is normally `|key| std::env::var(key).ok()`; tests pass a
    /// closure over a map instead of mutating the process environment.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_USER_AGENT) {
            self.fetcher.user_agent = value;
        }
        if let Some(value) = lookup(ENV_MAX_PAGES_PER_DOMAIN) {
            self.crawler.max_pages_per_domain = parse_override(ENV_MAX_PAGES_PER_DOMAIN, value)?;
        }
        if let Some(value) = lookup(ENV_REQUEST_DELAY) {
            self.crawler.request_delay = parse_override(ENV_REQUEST_DELAY, value)?;
        }
        if let Some(value) = lookup(ENV_REQUEST_TIMEOUT) {
            self.fetcher.request_timeout = parse_override(ENV_REQUEST_TIMEOUT, value)?;
        }
        if let Some(value) = lookup(ENV_DATABASE) {
            self.storage.database_path = value;
        }
        if let Some(value) = lookup(ENV_SEEDS) {
            self.input.seeds_path = value;
        }
        Ok(())
    }
}

fn parse_override<T: FromStr>(key: &str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::EnvOverride {
            key: key.to_string(),
            value,
        })
}
