//! Integration tests for the crawler
//!
//! Each mock server is its own network location, so two servers stand in
//! for two domains.

use crate::common::{mount_page, mount_status, page, request_count, test_fetcher};
use std::collections::HashSet;
use std::sync::Arc;
use sumi_harvest::crawler::Crawler;
use sumi_harvest::observer::NoopObserver;
use sumi_harvest::url::{extract_domain, parse_absolute_url};
use wiremock::MockServer;

fn crawler(max_pages: usize) -> Crawler {
    Crawler::new(test_fetcher(), max_pages).observe_with(Arc::new(NoopObserver))
}

#[tokio::test]
async fn test_external_links_are_never_fetched() {
    let site = MockServer::start().await;
    let other = MockServer::start().await;
    let base = site.uri();

    mount_page(
        &site,
        "/",
        page(
            "Home",
            "Welcome",
            &[format!("{}/p1", base), format!("{}/", other.uri())],
        ),
        1,
    )
    .await;
    mount_page(&site, "/p1", page("P1", "First page", &[]), 1).await;
    mount_page(&other, "/", page("Other", "Elsewhere", &[]), 0).await;

    let found = crawler(50).crawl_domain(&format!("{}/", base)).await.unwrap();

    assert_eq!(found, vec![format!("{}/", base), format!("{}/p1", base)]);
    assert!(found.iter().all(|u| !u.starts_with(&other.uri())));
}

#[tokio::test]
async fn test_budget_stops_unbounded_fan_out() {
    let site = MockServer::start().await;

    let children: Vec<String> = (1..=5).map(|i| format!("/page{}", i)).collect();
    mount_page(&site, "/", page("Home", "Root", &children), 1).await;
    for child in &children {
        let grandchildren: Vec<String> = (1..=5).map(|j| format!("{}/sub{}", child, j)).collect();
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path(child.as_str()))
            .respond_with(
                wiremock::ResponseTemplate::new(200)
                    .set_body_raw(page("Child", "Child text", &grandchildren), "text/html"),
            )
            .mount(&site)
            .await;
    }

    let found = crawler(2)
        .crawl_domain(&format!("{}/", site.uri()))
        .await
        .unwrap();

    assert_eq!(found.len(), 2);
    assert_eq!(request_count(&site).await, 2);
}

#[tokio::test]
async fn test_each_page_fetched_once_despite_cycles() {
    let site = MockServer::start().await;

    mount_page(&site, "/", page("Home", "Root", &["/a".into(), "/b".into()]), 1).await;
    mount_page(&site, "/a", page("A", "Page a", &["/b".into(), "/".into()]), 1).await;
    mount_page(&site, "/b", page("B", "Page b", &["/a".into(), "/a#top".into()]), 1).await;

    let found = crawler(50)
        .crawl_domain(&format!("{}/", site.uri()))
        .await
        .unwrap();

    let unique: HashSet<_> = found.iter().collect();
    assert_eq!(found.len(), 3);
    assert_eq!(unique.len(), 3);
}

#[tokio::test]
async fn test_failed_pages_do_not_stop_crawl() {
    let site = MockServer::start().await;

    mount_page(
        &site,
        "/",
        page("Home", "Root", &["/broken".into(), "/missing".into(), "/ok".into()]),
        1,
    )
    .await;
    mount_status(&site, "/broken", 500).await;
    mount_status(&site, "/missing", 404).await;
    mount_page(&site, "/ok", page("Ok", "Fine", &["/broken".into()]), 1).await;

    let found = crawler(50)
        .crawl_domain(&format!("{}/", site.uri()))
        .await
        .unwrap();

    assert_eq!(
        found,
        vec![format!("{}/", site.uri()), format!("{}/ok", site.uri())]
    );
    // Root, broken, missing, ok; broken is not retried
    assert_eq!(request_count(&site).await, 4);
}

#[tokio::test]
async fn test_discovered_urls_stay_on_seed_domain() {
    let site = MockServer::start().await;
    let other = MockServer::start().await;

    mount_page(
        &site,
        "/",
        page("Home", "Root", &["/x".into(), format!("{}/y", other.uri())]),
        1,
    )
    .await;
    mount_page(&site, "/x", page("X", "x", &[format!("{}/z", other.uri())]), 1).await;

    let seed = format!("{}/", site.uri());
    let seed_domain = extract_domain(&parse_absolute_url(&seed).unwrap());
    let found = crawler(50).crawl_domain(&seed).await.unwrap();

    for url in &found {
        assert_eq!(extract_domain(&parse_absolute_url(url).unwrap()), seed_domain);
    }
    assert_eq!(request_count(&other).await, 0);
}

#[tokio::test]
async fn test_multiple_domains_survive_a_dead_seed() {
    let a = MockServer::start().await;
    let b = MockServer::start().await;
    mount_page(&a, "/", page("A", "a", &[]), 1).await;
    mount_page(&b, "/", page("B", "b", &[]), 1).await;

    let seeds = vec![
        format!("{}/", a.uri()),
        "http://".to_string(),
        "http://127.0.0.1:1/".to_string(),
        format!("{}/", b.uri()),
    ];
    let found = crawler(10).crawl_multiple_domains(&seeds).await;

    assert_eq!(found, vec![format!("{}/", a.uri()), format!("{}/", b.uri())]);
}
