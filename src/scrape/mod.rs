//! Scrape stage: turn discovered URLs into stored content

mod orchestrator;

pub use orchestrator::Orchestrator;

use serde::Serialize;

/// Per-run scrape counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScrapeStats {
    /// Pages fetched, extracted and newly stored
    pub success: usize,
    /// Invalid URLs, fetch failures and pages with no content
    pub failed: usize,
    /// URLs already present in the store
    pub skipped: usize,
}

impl ScrapeStats {
    /// Number of URLs accounted for
    pub fn total(&self) -> usize {
        self.success + self.failed + self.skipped
    }
}
