//! Composable retry policy
//!
//! Retry is a wrapper around any [`PageFetcher`], chosen by the caller.
//! The plain [`Fetcher`](super::Fetcher) makes exactly one attempt.

use crate::config::RetryConfig;
use crate::crawler::fetcher::{FetchError, FetchedPage, PageFetcher};
use async_trait::async_trait;
use std::time::Duration;

/// Upper bound for a single backoff sleep
const MAX_BACKOFF: Duration = Duration::from_secs(60);

/// How many times to attempt a fetch and how long to wait in between
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Sleep before the second attempt
    pub backoff: Duration,
    /// Growth factor applied to the sleep after each further attempt
    pub multiplier: f64,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff: Duration, multiplier: f64) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff,
            multiplier: if multiplier.is_finite() && multiplier >= 1.0 {
                multiplier
            } else {
                1.0
            },
        }
    }

    /// A single attempt, no retry
    pub fn none() -> Self {
        Self::new(1, Duration::ZERO, 1.0)
    }

    pub fn from_config(config: &RetryConfig) -> Self {
        Self::new(
            config.max_attempts,
            Duration::try_from_secs_f64(config.backoff).unwrap_or(Duration::ZERO),
            config.backoff_multiplier,
        )
    }

    /// Sleep before retry number `retry` (1-based), capped at one minute
    pub fn delay_for(&self, retry: u32) -> Duration {
        let exponent = retry.saturating_sub(1).min(32) as i32;
        let secs = self.backoff.as_secs_f64() * self.multiplier.powi(exponent);
        Duration::try_from_secs_f64(secs)
            .unwrap_or(MAX_BACKOFF)
            .min(MAX_BACKOFF)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::none()
    }
}

/// A fetcher that re-issues transient failures according to a policy
///
/// Permanent failures (see [`FetchError::is_transient`]) are returned on
/// the first attempt.
#[derive(Debug, Clone)]
pub struct Retrying<F> {
    inner: F,
    policy: RetryPolicy,
}

impl<F> Retrying<F> {
    pub fn new(inner: F, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    #[cfg(test)]
    fn into_inner(self) -> F {
        self.inner
    }
}

#[async_trait]
impl<F: PageFetcher> PageFetcher for Retrying<F> {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let mut attempt = 1;
        loop {
            match self.inner.fetch(url).await {
                Ok(page) => return Ok(page),
                Err(e) if e.is_transient() && attempt < self.policy.max_attempts => {
                    let delay = self.policy.delay_for(attempt);
                    tracing::debug!(
                        "Attempt {}/{} for {} failed ({}), retrying in {:?}",
                        attempt,
                        self.policy.max_attempts,
                        url,
                        e.cause,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
