//! End-to-end runs of the whole pipeline

use crate::common::{mount_page, page, test_fetcher};
use std::fs;
use std::sync::Arc;
use sumi_harvest::config::Config;
use sumi_harvest::observer::NoopObserver;
use sumi_harvest::pipeline::{run_from_config, run_pipeline};
use sumi_harvest::storage::{ContentStore, InMemoryStore, SqliteStore};
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;
use wiremock::MockServer;

fn config_in(dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.crawler.request_delay = 0.0;
    config.storage.database_path = dir.path().join("harvest.db").display().to_string();
    config
}

#[tokio::test]
async fn test_rerun_skips_everything_already_stored() {
    let site = MockServer::start().await;
    // Two crawl fetches and one scrape fetch per page across both runs
    mount_page(&site, "/", page("Home", "Front page", &["/about".into()]), 3).await;
    mount_page(&site, "/about", page("About", "About us", &[]), 3).await;

    let dir = TempDir::new().unwrap();
    let seeds_path = dir.path().join("seeds.txt");
    fs::write(&seeds_path, format!("# seeds\n{}/\n", site.uri())).unwrap();
    let config = config_in(&dir);

    let first = run_from_config(&config, &seeds_path, CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(first.seeds, 1);
    assert_eq!(first.discovered, 2);
    assert_eq!(first.scrape.success, 2);
    assert_eq!(first.store.total_scraped_urls, 2);

    let second = run_from_config(&config, &seeds_path, CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(second.discovered, 2);
    assert_eq!(second.scrape.success, 0);
    assert_eq!(second.scrape.skipped, second.discovered);
    assert_eq!(second.store, first.store);

    let store = SqliteStore::open(dir.path().join("harvest.db").as_path()).unwrap();
    let mut urls = store.list_all_urls().unwrap();
    urls.sort();
    assert_eq!(urls, vec![format!("{}/", site.uri()), format!("{}/about", site.uri())]);
}

#[tokio::test]
async fn test_missing_seed_file_fails_the_run() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);

    let result = run_from_config(
        &config,
        &dir.path().join("absent.txt"),
        CancellationToken::new(),
    )
    .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_two_domains_feed_one_store() {
    let a = MockServer::start().await;
    let b = MockServer::start().await;
    mount_page(&a, "/", page("A", "Alpha text", &["/more".into()]), 2).await;
    mount_page(&a, "/more", page("More", "More alpha", &[]), 2).await;
    mount_page(&b, "/", page("B", "Beta text", &[]), 2).await;

    let store = Arc::new(InMemoryStore::new());
    let seeds = vec![format!("{}/", a.uri()), format!("{}/", b.uri())];

    let report = run_pipeline(
        &Config::default(),
        &seeds,
        store.clone(),
        test_fetcher(),
        Arc::new(NoopObserver),
        CancellationToken::new(),
    )
    .await
    .unwrap();

    assert_eq!(report.discovered, 3);
    assert_eq!(report.scrape.success, 3);
    assert_eq!(report.scrape.failed, 0);
    assert!(store.is_scraped(&format!("{}/more", a.uri())).unwrap());
    assert!(store.is_scraped(&format!("{}/", b.uri())).unwrap());
}
