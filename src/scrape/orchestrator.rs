//! Scrape orchestrator - fetch, extract and store a list of URLs
//!
//! URLs are processed one at a time, in input order. Per-URL problems are
//! counted and the loop moves on; only a store failure stops it.

use crate::crawler::PageFetcher;
use crate::extract::extract_content;
use crate::observer::{HarvestObserver, TracingObserver};
use crate::scrape::ScrapeStats;
use crate::storage::{content_key, ContentStore, StoreOutcome};
use crate::url::parse_absolute_url;
use crate::HarvestError;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// How often (in URLs) progress is reported
const PROGRESS_INTERVAL: usize = 10;

/// What happened to a single URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UrlOutcome {
    Stored,
    Skipped,
    Failed,
}

/// Drives fetcher, extractor and store over a URL list
pub struct Orchestrator {
    fetcher: Arc<dyn PageFetcher>,
    store: Arc<dyn ContentStore>,
    observer: Arc<dyn HarvestObserver>,
    cancel: CancellationToken,
}

impl Orchestrator {
    /// Creates an orchestrator that logs through [`TracingObserver`]
    pub fn new(fetcher: Arc<dyn PageFetcher>, store: Arc<dyn ContentStore>) -> Self {
        Self {
            fetcher,
            store,
            observer: Arc::new(TracingObserver),
            cancel: CancellationToken::new(),
        }
    }

    /// Replaces the observer
    pub fn observe_with(mut self, observer: Arc<dyn HarvestObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Stops before the next URL once `cancel` fires
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Scrapes every URL not already in the store
    ///
    /// # Per-URL Outcomes
    ///
    /// | Condition | Counter |
    /// |-----------|---------|
    /// | Not a valid absolute URL | failed |
    /// | Already in the scraped index | skipped |
    /// | Fetch failed | failed |
    /// | Extracted content is empty | failed |
    /// | Stored | success |
    /// | Indexed by someone else meanwhile | skipped |
    ///
    /// Empty content is never written.
    ///
    /// # Returns
    ///
    /// * `Ok(ScrapeStats)` - Counters for every URL processed (all of them
    ///   unless cancelled)
    /// * `Err(HarvestError::Storage)` - The store failed; the run must stop
    pub async fn scrape_all(&self, urls: &[String]) -> Result<ScrapeStats, HarvestError> {
        let mut stats = ScrapeStats::default();
        let total = urls.len();

        tracing::info!("Scraping {} URLs", total);

        for (i, url) in urls.iter().enumerate() {
            if self.cancel.is_cancelled() {
                self.observer.on_cancelled("scrape");
                break;
            }

            match self.scrape_one(url).await? {
                UrlOutcome::Stored => stats.success += 1,
                UrlOutcome::Skipped => stats.skipped += 1,
                UrlOutcome::Failed => stats.failed += 1,
            }

            let processed = i + 1;
            if processed % PROGRESS_INTERVAL == 0 {
                self.observer.on_scrape_progress(processed, total, &stats);
            }
        }

        self.observer.on_scrape_finished(&stats);
        Ok(stats)
    }

    async fn scrape_one(&self, raw_url: &str) -> Result<UrlOutcome, HarvestError> {
        let url = match parse_absolute_url(raw_url) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("Skipping invalid URL {:?}: {}", raw_url, e);
                return Ok(UrlOutcome::Failed);
            }
        };
        let url = url.as_str();

        if self.store.is_scraped(url)? {
            self.observer.on_url_skipped(url);
            return Ok(UrlOutcome::Skipped);
        }

        let page = match self.fetcher.fetch(url).await {
            Ok(page) => page,
            Err(e) => {
                self.observer.on_fetch_failed(url, &e.cause.to_string());
                return Ok(UrlOutcome::Failed);
            }
        };

        let extracted = extract_content(&page.body);
        if extracted.is_empty() {
            self.observer.on_empty_content(url);
            return Ok(UrlOutcome::Failed);
        }

        match self.store.store(url, &extracted.content, &extracted.title)? {
            StoreOutcome::Stored => {
                self.observer.on_url_stored(
                    url,
                    &content_key(url),
                    extracted.content.chars().count(),
                );
                Ok(UrlOutcome::Stored)
            }
            StoreOutcome::AlreadyStored => {
                self.observer.on_url_skipped(url);
                Ok(UrlOutcome::Skipped)
            }
        }
    }
}
