//! Per-seed crawl state
//!
//! Tracks the frontier queue together with the visited and queued sets for
//! a single domain crawl. URLs are keyed by their canonical string form.

use std::collections::{HashSet, VecDeque};
use url::Url;

/// Frontier and bookkeeping for one domain crawl
///
/// The frontier is FIFO, which gives breadth-first order: pages close to
/// the seed are discovered before deeper ones.
#[derive(Debug)]
pub struct CrawlState {
    /// URLs waiting to be fetched
    frontier: VecDeque<Url>,

    /// Canonical URLs currently in the frontier
    queued: HashSet<String>,

    /// Canonical URLs that have been fetched (successfully or not)
    visited: HashSet<String>,

    /// Successfully fetched pages, in discovery order
    discovered: Vec<Url>,
}

impl CrawlState {
    /// Creates state whose frontier holds only the seed
    pub fn new(seed: Url) -> Self {
        let mut state = Self {
            frontier: VecDeque::new(),
            queued: HashSet::new(),
            visited: HashSet::new(),
            discovered: Vec::new(),
        };
        state.enqueue(seed);
        state
    }

    /// Pops the next URL to consider
    pub fn next(&mut self) -> Option<Url> {
        let url = self.frontier.pop_front()?;
        self.queued.remove(url.as_str());
        Some(url)
    }

    /// Adds a URL to the back of the frontier
    ///
    /// Returns false (and does nothing) if the URL was already visited or is
    /// already waiting.
    pub fn enqueue(&mut self, url: Url) -> bool {
        if self.visited.contains(url.as_str()) || self.queued.contains(url.as_str()) {
            return false;
        }
        self.queued.insert(url.as_str().to_string());
        self.frontier.push_back(url);
        true
    }

    /// Records that a fetch of this URL was attempted
    pub fn mark_visited(&mut self, url: &Url) {
        self.visited.insert(url.as_str().to_string());
    }

    /// Records a successfully fetched page
    pub fn mark_discovered(&mut self, url: Url) {
        self.discovered.push(url);
    }

    pub fn is_visited(&self, url: &Url) -> bool {
        self.visited.contains(url.as_str())
    }

    pub fn discovered_count(&self) -> usize {
        self.discovered.len()
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Consumes the state, returning discovered URLs in order
    pub fn into_discovered(self) -> Vec<Url> {
        self.discovered
    }
}
