//! Crawler module for web page fetching and link discovery
//!
//! This module contains the discovery half of the pipeline, including:
//! - HTTP fetching behind a process-wide pacer
//! - Optional retry of transient failures
//! - HTML link extraction
//! - The bounded, domain-scoped crawl loop

mod crawl;
mod fetcher;
mod frontier;
mod pacer;
mod parser;
mod retry;

pub use crawl::Crawler;
pub use fetcher::{build_http_client, FetchError, FetchFailure, FetchedPage, Fetcher, PageFetcher};
pub use frontier::CrawlState;
pub use pacer::Pacer;
pub use parser::extract_links;
pub use retry::{RetryPolicy, Retrying};
