//! Integration tests for the scrape orchestrator and content store

use crate::common::{mount_page, mount_status, page, test_fetcher};
use std::sync::Arc;
use std::time::Duration;
use sumi_harvest::crawler::{build_http_client, Fetcher, Pacer, PageFetcher, RetryPolicy, Retrying};
use sumi_harvest::observer::NoopObserver;
use sumi_harvest::scrape::{Orchestrator, ScrapeStats};
use sumi_harvest::storage::{ContentStore, InMemoryStore, SqliteStore};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn orchestrator(store: Arc<dyn ContentStore>) -> Orchestrator {
    Orchestrator::new(test_fetcher(), store).observe_with(Arc::new(NoopObserver))
}

#[tokio::test]
async fn test_server_error_counts_as_failure_only() {
    let server = MockServer::start().await;
    mount_page(&server, "/one", page("One", "First article", &[]), 1).await;
    mount_status(&server, "/two", 500).await;
    mount_page(&server, "/three", page("Three", "Third article", &[]), 1).await;

    let urls: Vec<String> = ["/one", "/two", "/three"]
        .iter()
        .map(|p| format!("{}{}", server.uri(), p))
        .collect();

    let store = Arc::new(SqliteStore::open_in_memory().unwrap());
    let stats = orchestrator(store.clone()).scrape_all(&urls).await.unwrap();

    assert_eq!(
        stats,
        ScrapeStats {
            success: 2,
            failed: 1,
            skipped: 0
        }
    );
    assert!(store.is_scraped(&urls[0]).unwrap());
    assert!(!store.is_scraped(&urls[1]).unwrap());
    assert!(store.is_scraped(&urls[2]).unwrap());
}

#[tokio::test]
async fn test_second_run_against_same_database_skips() {
    let server = MockServer::start().await;
    // Only the first run may fetch the page
    mount_page(&server, "/article", page("Article", "Durable text", &[]), 1).await;

    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("harvest.db");
    let urls = vec![format!("{}/article", server.uri())];

    let first = {
        let store = Arc::new(SqliteStore::open(&db_path).unwrap());
        orchestrator(store).scrape_all(&urls).await.unwrap()
    };
    assert_eq!(first.success, 1);

    let store = Arc::new(SqliteStore::open(&db_path).unwrap());
    let second = orchestrator(store).scrape_all(&urls).await.unwrap();

    assert_eq!(second.skipped, 1);
    assert_eq!(second.success, 0);
    assert_eq!(second.failed, 0);
}

#[tokio::test]
async fn test_stored_record_round_trips() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/post",
        page("My  Post!", "Some   interesting\n\n text, really.", &[]),
        1,
    )
    .await;

    let url = format!("{}/post", server.uri());
    let store = Arc::new(InMemoryStore::new());
    orchestrator(store.clone())
        .scrape_all(&[url.clone()])
        .await
        .unwrap();

    let record = store.get(&url).unwrap().unwrap();
    assert_eq!(record.url, url);
    assert_eq!(record.title, "My Post!");
    assert_eq!(record.content, "Some interesting text, really.");
    assert_eq!(record.content_length, record.content.chars().count());
    assert_eq!(store.list_all_urls().unwrap(), vec![url]);
}

#[tokio::test]
async fn test_pages_without_content_are_not_persisted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/menu"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            "<html><body><header>Logo</header><nav>Home</nav><script>run()</script></body></html>",
            "text/html",
        ))
        .mount(&server)
        .await;

    let url = format!("{}/menu", server.uri());
    let store = Arc::new(InMemoryStore::new());
    let stats = orchestrator(store.clone())
        .scrape_all(&[url.clone()])
        .await
        .unwrap();

    assert_eq!(stats.failed, 1);
    assert!(!store.is_scraped(&url).unwrap());
    assert_eq!(store.stats().unwrap().total_scraped_urls, 0);
}

#[tokio::test]
async fn test_retry_recovers_from_transient_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_page(&server, "/flaky", page("Flaky", "Eventually fine", &[]), 1).await;

    let client = build_http_client(&Default::default()).unwrap();
    let fetcher: Arc<dyn PageFetcher> = Arc::new(Retrying::new(
        Fetcher::new(client, Pacer::new(Duration::ZERO)),
        RetryPolicy::new(3, Duration::from_millis(10), 2.0),
    ));

    let store = Arc::new(InMemoryStore::new());
    let stats = Orchestrator::new(fetcher, store)
        .observe_with(Arc::new(NoopObserver))
        .scrape_all(&[format!("{}/flaky", server.uri())])
        .await
        .unwrap();

    assert_eq!(stats.success, 1);
}
