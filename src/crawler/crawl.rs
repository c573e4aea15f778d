//! Bounded, domain-scoped link discovery
//!
//! A crawl starts from one seed and follows same-domain links breadth-first
//! until the domain's page budget is spent or the frontier runs dry.
//! Cross-domain links are seen but never fetched.

use crate::crawler::fetcher::PageFetcher;
use crate::crawler::frontier::CrawlState;
use crate::crawler::parser::extract_links;
use crate::observer::{HarvestObserver, TracingObserver};
use crate::url::{parse_absolute_url, same_domain};
use crate::UrlError;
use std::collections::HashSet;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Link discovery over one or more seed domains
pub struct Crawler {
    fetcher: Arc<dyn PageFetcher>,
    max_pages_per_domain: usize,
    observer: Arc<dyn HarvestObserver>,
    cancel: CancellationToken,
}

impl Crawler {
    /// Creates a crawler that logs through [`TracingObserver`]
    pub fn new(fetcher: Arc<dyn PageFetcher>, max_pages_per_domain: usize) -> Self {
        Self {
            fetcher,
            max_pages_per_domain,
            observer: Arc::new(TracingObserver),
            cancel: CancellationToken::new(),
        }
    }

    /// Replaces the observer
    pub fn observe_with(mut self, observer: Arc<dyn HarvestObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Stops crawling (between fetches) once `cancel` fires
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Discovers up to `max_pages_per_domain` pages reachable from `seed`
    ///
    /// # Crawl Loop
    ///
    /// 1. Pop the next URL from the frontier; stop if it is empty
    /// 2. Skip it if already visited
    /// 3. Skip it without fetching if its domain differs from the seed's
    /// 4. Fetch it; on failure mark it visited and move on
    /// 5. On success mark it visited and discovered, then queue every
    ///    same-domain link that is neither visited nor already queued
    ///
    /// Links are resolved against the page's final URL after redirects. A
    /// same-domain redirect target is marked visited too, so a later link to
    /// it is not fetched again. The page is recorded under the URL that was
    /// requested. A failed fetch never aborts the crawl, not even for the
    /// seed.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<String>)` - Discovered URLs in discovery order
    /// * `Err(UrlError)` - The seed itself is not a valid URL
    pub async fn crawl_domain(&self, seed: &str) -> Result<Vec<String>, UrlError> {
        let seed_url = parse_absolute_url(seed)?;

        self.observer
            .on_crawl_started(seed_url.as_str(), self.max_pages_per_domain);

        let mut state = CrawlState::new(seed_url.clone());

        while state.discovered_count() < self.max_pages_per_domain {
            if self.cancel.is_cancelled() {
                self.observer.on_cancelled("crawl");
                break;
            }

            let url = match state.next() {
                Some(url) => url,
                None => break,
            };

            if state.is_visited(&url) {
                continue;
            }

            if !same_domain(&url, &seed_url) {
                tracing::trace!("Not following off-domain URL {}", url);
                continue;
            }

            state.mark_visited(&url);

            let page = match self.fetcher.fetch(url.as_str()).await {
                Ok(page) => page,
                Err(e) => {
                    self.observer.on_fetch_failed(url.as_str(), &e.cause.to_string());
                    continue;
                }
            };

            state.mark_discovered(url.clone());
            self.observer.on_page_discovered(
                url.as_str(),
                state.discovered_count(),
                self.max_pages_per_domain,
            );

            let base = match parse_absolute_url(&page.url) {
                Ok(final_url) => {
                    if final_url != url && same_domain(&final_url, &seed_url) {
                        tracing::trace!("{} redirected to {}", url, final_url);
                        state.mark_visited(&final_url);
                    }
                    final_url
                }
                Err(_) => url.clone(),
            };
            let mut queued = 0;
            for link in extract_links(&page.body, &base) {
                if same_domain(&link, &seed_url) && state.enqueue(link) {
                    queued += 1;
                }
            }
            tracing::debug!(
                "{}: queued {} new links ({} in frontier)",
                url,
                queued,
                state.frontier_len()
            );
        }

        let discovered: Vec<String> = state
            .into_discovered()
            .into_iter()
            .map(String::from)
            .collect();

        self.observer
            .on_crawl_finished(seed_url.as_str(), discovered.len());

        Ok(discovered)
    }

    /// Crawls every seed in turn and unions the results
    ///
    /// Order is preserved: URLs from the first seed come first, and a URL
    /// discovered from two seeds appears once. An invalid seed is reported
    /// and skipped; it never stops the remaining seeds.
    pub async fn crawl_multiple_domains(&self, seeds: &[String]) -> Vec<String> {
        let mut all = Vec::new();
        let mut seen = HashSet::new();

        for seed in seeds {
            if self.cancel.is_cancelled() {
                break;
            }

            match self.crawl_domain(seed).await {
                Ok(urls) => {
                    for url in urls {
                        if seen.insert(url.clone()) {
                            all.push(url);
                        }
                    }
                }
                Err(e) => self.observer.on_seed_rejected(seed, &e.to_string()),
            }
        }

        tracing::info!(
            "Discovered {} unique URLs across {} seeds",
            all.len(),
            seeds.len()
        );

        all
    }
}
