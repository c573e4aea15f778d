//! Shared helpers for the integration tests

use std::sync::Arc;
use std::time::Duration;
use sumi_harvest::config::FetcherConfig;
use sumi_harvest::crawler::{build_http_client, Fetcher, Pacer, PageFetcher};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A fetcher with no pacing and short timeouts
pub fn test_fetcher() -> Arc<dyn PageFetcher> {
    let config = FetcherConfig {
        request_timeout: 5,
        connect_timeout: 2,
        user_agent: "HarvestTest/1.0".to_string(),
    };
    let client = build_http_client(&config).expect("client builds");
    Arc::new(Fetcher::new(client, Pacer::new(Duration::ZERO)))
}

/// An HTML page with a title, some body text and the given links
pub fn page(title: &str, text: &str, links: &[String]) -> String {
    let anchors: String = links
        .iter()
        .map(|href| format!(r#"<a href="{}">link</a>"#, href))
        .collect();
    format!(
        "<html><head><title>{}</title></head><body><nav>{}</nav><main><p>{}</p></main></body></html>",
        title, anchors, text
    )
}

/// Mounts an HTML page at `route`, expecting exactly `times` requests
pub async fn mount_page(server: &MockServer, route: &str, html: String, times: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(html, "text/html"))
        .expect(times)
        .mount(server)
        .await;
}

/// Mounts a fixed status at `route`
pub async fn mount_status(server: &MockServer, route: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// Number of requests the server has seen
pub async fn request_count(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .map(|r| r.len())
        .unwrap_or(0)
}
