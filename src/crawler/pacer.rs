//! Process-wide request pacing
//!
//! The pacer enforces a minimum interval between the *starts* of
//! consecutive requests. It is shared by every clone of the fetcher, so the
//! crawl phase and the scrape phase are paced by the same clock.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Minimum-interval gate shared across the process
#[derive(Debug, Clone)]
pub struct Pacer {
    interval: Duration,
    last_request: Arc<Mutex<Option<Instant>>>,
}

impl Pacer {
    /// Creates a pacer; a zero interval never waits
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    /// The configured minimum interval
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Waits until a request may start, then records it as started
    ///
    /// The lock is held across the sleep, so concurrent callers are
    /// released one interval apart rather than all at once.
    pub async fn wait(&self) {
        let mut last = self.last_request.lock().await;

        if let Some(wait) = self.time_until_next_request(*last, Instant::now()) {
            tracing::trace!("Pacing: waiting {:?} before next request", wait);
            tokio::time::sleep(wait).await;
        }

        *last = Some(Instant::now());
    }

    /// Calculates the time until the next request can be made
    ///
    /// Returns None if a request can be made now.
    fn time_until_next_request(&self, last: Option<Instant>, now: Instant) -> Option<Duration> {
        let last = last?;
        let elapsed = now.saturating_duration_since(last);
        if elapsed < self.interval {
            Some(self.interval - elapsed)
        } else {
            None
        }
    }
}
