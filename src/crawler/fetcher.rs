//! HTTP fetcher implementation
//!
//! This module handles every HTTP request the pipeline makes:
//! - Building the HTTP client with the configured user agent and timeouts
//! - Pacing requests through the shared [`Pacer`]
//! - Classifying failures into a typed [`FetchError`]
//!
//! The fetcher never retries and never panics past its boundary; retry is
//! layered on top by [`Retrying`](super::Retrying).

use crate::config::{Config, FetcherConfig};
use crate::crawler::pacer::Pacer;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// A successfully fetched page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub url: String,
    /// HTTP status code (always 2xx)
    pub status: u16,
    /// Page body
    pub body: String,
}

/// Why a fetch failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchFailure {
    /// The server answered with a non-2xx status
    #[error("HTTP status {0}")]
    Status(u16),

    /// The request did not complete within the configured timeout
    #[error("request timed out")]
    Timeout,

    /// The connection could not be established
    #[error("connection failed: {0}")]
    Connect(String),

    /// The response body could not be read
    #[error("failed to read body: {0}")]
    Body(String),

    /// Any other client-side failure (invalid header, redirect loop, ...)
    #[error("request failed: {0}")]
    Request(String),
}

/// A failed fetch of a single URL
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to fetch {url}: {cause}")]
pub struct FetchError {
    pub url: String,
    pub cause: FetchFailure,
}

impl FetchError {
    pub fn new(url: impl Into<String>, cause: FetchFailure) -> Self {
        Self {
            url: url.into(),
            cause,
        }
    }

    /// Returns true if repeating the request may succeed
    ///
    /// | Condition | Transient |
    /// |-----------|-----------|
    /// | Timeout | yes |
    /// | Connection failure | yes |
    /// | HTTP 5xx, 408, 429 | yes |
    /// | Other HTTP status | no |
    /// | Body read error | yes |
    /// | Other request error | no |
    pub fn is_transient(&self) -> bool {
        match &self.cause {
            FetchFailure::Timeout | FetchFailure::Connect(_) | FetchFailure::Body(_) => true,
            FetchFailure::Status(code) => *code >= 500 || *code == 408 || *code == 429,
            FetchFailure::Request(_) => false,
        }
    }
}

/// Anything that can turn a URL into an HTML body
///
/// Implemented by [`Fetcher`] and by wrappers such as
/// [`Retrying`](super::Retrying), so the crawler and the orchestrator can
/// apply their own failure policies to the same fetch path.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;
}

#[async_trait]
impl<T: PageFetcher + ?Sized> PageFetcher for std::sync::Arc<T> {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        (**self).fetch(url).await
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use sumi_harvest::config::FetcherConfig;
/// use sumi_harvest::crawler::build_http_client;
///
/// let client = build_http_client(&FetcherConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.request_timeout))
        .connect_timeout(Duration::from_secs(config.connect_timeout))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Rate-limited HTTP fetcher
///
/// Cloning is cheap; clones share the HTTP connection pool and the pacer,
/// so the minimum delay holds across every clone in the process.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    pacer: Pacer,
}

impl Fetcher {
    /// Creates a fetcher from an existing client and pacer
    pub fn new(client: Client, pacer: Pacer) -> Self {
        Self { client, pacer }
    }

    /// Creates a fetcher from the full configuration
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        let client = build_http_client(&config.fetcher)?;
        let pacer = Pacer::new(config.crawler.request_delay());
        Ok(Self::new(client, pacer))
    }
}

#[async_trait]
impl PageFetcher for Fetcher {
    /// Fetches a URL, waiting for the pacer first
    ///
    /// Any non-2xx status, timeout, connection failure or unreadable body is
    /// returned as a [`FetchError`] for this URL only.
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        self.pacer.wait().await;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::new(url, classify_error(&e)))?;

        let status = response.status();
        let final_url = response.url().to_string();

        if !status.is_success() {
            return Err(FetchError::new(url, FetchFailure::Status(status.as_u16())));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::new(url, FetchFailure::Body(e.to_string())))?;

        Ok(FetchedPage {
            url: final_url,
            status: status.as_u16(),
            body,
        })
    }
}

/// Maps a reqwest error onto the failure taxonomy
fn classify_error(error: &reqwest::Error) -> FetchFailure {
    if error.is_timeout() {
        FetchFailure::Timeout
    } else if error.is_connect() {
        FetchFailure::Connect(error.to_string())
    } else if let Some(status) = error.status() {
        FetchFailure::Status(status.as_u16())
    } else {
        FetchFailure::Request(error.to_string())
    }
}
