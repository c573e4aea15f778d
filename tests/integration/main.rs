//! End-to-end tests against wiremock servers

mod common;
mod crawl_tests;
mod pipeline_tests;
mod scrape_tests;
