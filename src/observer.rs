//! Progress and outcome notifications
//!
//! Crawl and scrape stages report what happens to each URL through a
//! [`HarvestObserver`]. The default [`TracingObserver`] turns every event
//! into a log line; tests and embedders can plug in their own.

use crate::scrape::ScrapeStats;
use std::sync::Arc;

/// Receives pipeline events
///
/// Every method has an empty default so implementors only override what
/// they care about. Methods are called inline on the pipeline task and
/// must not block.
///
/// # Example
///
/// ```
/// use sumi_harvest::HarvestObserver;
///
/// struct FailureCounter(std::sync::atomic::AtomicUsize);
///
/// impl HarvestObserver for FailureCounter {
///     fn on_fetch_failed(&self, _url: &str, _error: &str) {
///         self.0.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
///     }
/// }
/// ```
pub trait HarvestObserver: Send + Sync {
    /// A crawl of one seed is starting
    fn on_crawl_started(&self, _seed: &str, _max_pages: usize) {}

    /// A page was fetched successfully and counted toward its domain budget
    fn on_page_discovered(&self, _url: &str, _discovered: usize, _max_pages: usize) {}

    /// A fetch failed; the URL is not retried in this run
    fn on_fetch_failed(&self, _url: &str, _error: &str) {}

    /// A crawl of one seed finished
    fn on_crawl_finished(&self, _seed: &str, _discovered: usize) {}

    /// A seed could not be parsed and was skipped
    fn on_seed_rejected(&self, _seed: &str, _error: &str) {}

    /// A URL was already in the store and was not fetched again
    fn on_url_skipped(&self, _url: &str) {}

    /// A URL's content was written to the store
    fn on_url_stored(&self, _url: &str, _key: &str, _content_length: usize) {}

    /// A page was fetched but yielded no usable text
    fn on_empty_content(&self, _url: &str) {}

    /// Periodic scrape progress
    fn on_scrape_progress(&self, _processed: usize, _total: usize, _stats: &ScrapeStats) {}

    /// The scrape stage finished
    fn on_scrape_finished(&self, _stats: &ScrapeStats) {}

    /// The run was cancelled before the named stage completed
    fn on_cancelled(&self, _stage: &str) {}
}

impl<T: HarvestObserver + ?Sized> HarvestObserver for Arc<T> {
    fn on_crawl_started(&self, seed: &str, max_pages: usize) {
        (**self).on_crawl_started(seed, max_pages)
    }
    fn on_page_discovered(&self, url: &str, discovered: usize, max_pages: usize) {
        (**self).on_page_discovered(url, discovered, max_pages)
    }
    fn on_fetch_failed(&self, url: &str, error: &str) {
        (**self).on_fetch_failed(url, error)
    }
    fn on_crawl_finished(&self, seed: &str, discovered: usize) {
        (**self).on_crawl_finished(seed, discovered)
    }
    fn on_seed_rejected(&self, seed: &str, error: &str) {
        (**self).on_seed_rejected(seed, error)
    }
    fn on_url_skipped(&self, url: &str) {
        (**self).on_url_skipped(url)
    }
    fn on_url_stored(&self, url: &str, key: &str, content_length: usize) {
        (**self).on_url_stored(url, key, content_length)
    }
    fn on_empty_content(&self, url: &str) {
        (**self).on_empty_content(url)
    }
    fn on_scrape_progress(&self, processed: usize, total: usize, stats: &ScrapeStats) {
        (**self).on_scrape_progress(processed, total, stats)
    }
    fn on_scrape_finished(&self, stats: &ScrapeStats) {
        (**self).on_scrape_finished(stats)
    }
    fn on_cancelled(&self, stage: &str) {
        (**self).on_cancelled(stage)
    }
}

/// Observer that ignores every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl HarvestObserver for NoopObserver {}

/// Observer that logs every event through `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl HarvestObserver for TracingObserver {
    fn on_crawl_started(&self, seed: &str, max_pages: usize) {
        tracing::info!("Crawling {} (up to {} pages)", seed, max_pages);
    }

    fn on_page_discovered(&self, url: &str, discovered: usize, max_pages: usize) {
        tracing::info!("Discovered [{}/{}]: {}", discovered, max_pages, url);
    }

    fn on_fetch_failed(&self, url: &str, error: &str) {
        tracing::warn!("Fetch failed for {}: {}", url, error);
    }

    fn on_crawl_finished(&self, seed: &str, discovered: usize) {
        tracing::info!("Finished crawling {}: {} pages discovered", seed, discovered);
    }

    fn on_seed_rejected(&self, seed: &str, error: &str) {
        tracing::warn!("Skipping invalid seed {:?}: {}", seed, error);
    }

    fn on_url_skipped(&self, url: &str) {
        tracing::debug!("Already scraped: {}", url);
    }

    fn on_url_stored(&self, url: &str, key: &str, content_length: usize) {
        tracing::info!("Stored {} as {} ({} chars)", url, key, content_length);
    }

    fn on_empty_content(&self, url: &str) {
        tracing::warn!("No content extracted from {}", url);
    }

    fn on_scrape_progress(&self, processed: usize, total: usize, stats: &ScrapeStats) {
        tracing::info!(
            "Progress: {}/{} URLs ({} stored, {} failed, {} skipped)",
            processed,
            total,
            stats.success,
            stats.failed,
            stats.skipped
        );
    }

    fn on_scrape_finished(&self, stats: &ScrapeStats) {
        tracing::info!(
            "Scraping complete: {} stored, {} failed, {} skipped",
            stats.success,
            stats.failed,
            stats.skipped
        );
    }

    fn on_cancelled(&self, stage: &str) {
        tracing::warn!("Cancelled during {}", stage);
    }
}
