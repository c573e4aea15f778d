//! Run coordinator
//!
//! A run has two phases over one shared fetcher:
//! 1. Crawl every seed to discover candidate URLs
//! 2. Scrape the candidates into the content store
//!
//! The store is checked once before any request is made; if it is
//! unreachable the run fails without touching the network.

use crate::config::{load_seed_urls, Config};
use crate::crawler::{Crawler, Fetcher, PageFetcher, RetryPolicy, Retrying};
use crate::observer::{HarvestObserver, TracingObserver};
use crate::scrape::{Orchestrator, ScrapeStats};
use crate::storage::{ContentStore, SqliteStore, StoreStats};
use crate::HarvestError;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;

/// Summary of one pipeline run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunReport {
    /// Seeds handed to the crawler
    pub seeds: usize,
    /// Unique URLs discovered across all seeds
    pub discovered: usize,
    /// Scrape counters
    pub scrape: ScrapeStats,
    /// Store figures after the run
    pub store: StoreStats,
    /// True if the run stopped early on request
    pub cancelled: bool,
    /// Wall-clock duration of the run
    pub elapsed_secs: f64,
}

/// Builds the fetcher used by both phases
///
/// The plain [`Fetcher`] is wrapped in [`Retrying`] only when the retry
/// section asks for more than one attempt.
pub fn build_fetcher(config: &Config) -> Result<Arc<dyn PageFetcher>, HarvestError> {
    let fetcher = Fetcher::from_config(config)?;
    let policy = RetryPolicy::from_config(&config.retry);

    if policy.max_attempts > 1 {
        tracing::debug!("Retrying transient fetch failures: {:?}", policy);
        Ok(Arc::new(Retrying::new(fetcher, policy)))
    } else {
        Ok(Arc::new(fetcher))
    }
}

/// Runs crawl then scrape over the given seeds
///
/// # Arguments
///
/// * `config` - Effective configuration
/// * `seeds` - Seed URLs; invalid ones are reported and skipped
/// * `store` - Content store; must be reachable
/// * `fetcher` - Shared by both phases so pacing spans the whole run
/// * `observer` - Receives progress events
/// * `cancel` - Stops the run between fetches
///
/// # Returns
///
/// * `Ok(RunReport)` - The run finished or was cancelled
/// * `Err(HarvestError)` - The store was unreachable or failed mid-run
pub async fn run_pipeline(
    config: &Config,
    seeds: &[String],
    store: Arc<dyn ContentStore>,
    fetcher: Arc<dyn PageFetcher>,
    observer: Arc<dyn HarvestObserver>,
    cancel: CancellationToken,
) -> Result<RunReport, HarvestError> {
    store.ping()?;

    let start_time = Instant::now();

    tracing::info!(
        "Phase 1: crawling {} seeds (up to {} pages each)",
        seeds.len(),
        config.crawler.max_pages_per_domain
    );
    let discovered = Crawler::new(fetcher.clone(), config.crawler.max_pages_per_domain)
        .observe_with(observer.clone())
        .with_cancellation(cancel.clone())
        .crawl_multiple_domains(seeds)
        .await;

    tracing::info!("Phase 2: scraping {} discovered URLs", discovered.len());
    let scrape = Orchestrator::new(fetcher, store.clone())
        .observe_with(observer)
        .with_cancellation(cancel.clone())
        .scrape_all(&discovered)
        .await?;

    let report = RunReport {
        seeds: seeds.len(),
        discovered: discovered.len(),
        scrape,
        store: store.stats()?,
        cancelled: cancel.is_cancelled(),
        elapsed_secs: start_time.elapsed().as_secs_f64(),
    };

    tracing::info!(
        "Run finished in {:.1}s: {} discovered, {} stored, {} failed, {} skipped",
        report.elapsed_secs,
        report.discovered,
        report.scrape.success,
        report.scrape.failed,
        report.scrape.skipped
    );

    Ok(report)
}

/// Runs the pipeline with everything built from the configuration
///
/// Seeds come from `seeds_path`, the store is the SQLite database named in
/// the configuration, and events are logged through [`TracingObserver`].
pub async fn run_from_config(
    config: &Config,
    seeds_path: &Path,
    cancel: CancellationToken,
) -> Result<RunReport, HarvestError> {
    let seeds = load_seed_urls(seeds_path)?;
    tracing::info!("Loaded {} seeds from {}", seeds.len(), seeds_path.display());

    let store = SqliteStore::open(Path::new(&config.storage.database_path))?;
    let fetcher = build_fetcher(config)?;

    run_pipeline(
        config,
        &seeds,
        Arc::new(store),
        fetcher,
        Arc::new(TracingObserver),
        cancel,
    )
    .await
}
