//! Exponential backoff for operations that report "try again later"
//!
//! The refresh pipeline never retries on its own: it hands back
//! [`RefreshOutcome::Retry`]. The daemon wraps each scheduled cycle in
//! [`with_retry`] so such a cycle is re-run after a growing, jittered delay.
//!
//! # Example
//!
//! ```rust,ignore
//! use infrastructure::retry::{RetryConfig, with_retry};
//!
//! let config = RetryConfig::default();
//! let result = with_retry(&config, || service.run(RefreshTrigger::Scheduled)).await;
//! ```

use std::future::Future;
use std::time::{Duration, Instant};

use application::RefreshOutcome;
use rand::Rng;
use tracing::{debug, warn};

/// Backoff parameters
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Delay before the first re-run in milliseconds
    pub initial_delay_ms: u64,
    /// Upper bound of a single delay in milliseconds
    pub max_delay_ms: u64,
    /// Growth factor between consecutive delays
    pub multiplier: f64,
    /// Re-runs allowed after the first attempt
    pub max_retries: u32,
    /// Spread delays randomly around their nominal value
    pub jitter_enabled: bool,
    /// Jitter amplitude as a fraction of the delay (0.0 to 1.0)
    pub jitter_factor: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::new(60_000, 600_000, 2.0, 3)
    }
}

impl RetryConfig {
    /// Create a retry configuration with 10% jitter
    #[must_use]
    pub const fn new(
        initial_delay_ms: u64,
        max_delay_ms: u64,
        multiplier: f64,
        max_retries: u32,
    ) -> Self {
        Self {
            initial_delay_ms,
            max_delay_ms,
            multiplier,
            max_retries,
            jitter_enabled: true,
            jitter_factor: 0.1,
        }
    }

    /// Disable jitter
    #[must_use]
    pub const fn without_jitter(mut self) -> Self {
        self.jitter_enabled = false;
        self
    }

    /// Delay before re-run number `attempt` (0-indexed)
    ///
    /// `initial_delay * multiplier^attempt`, capped at `max_delay`, then
    /// jittered. Never negative.
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_wrap,
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation
    )]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
        let base_delay = (self.initial_delay_ms as f64) * self.multiplier.powi(exponent);
        let capped_delay = base_delay.min(self.max_delay_ms as f64);

        let final_delay = if self.jitter_enabled && capped_delay > 0.0 {
            let jitter_range = capped_delay * self.jitter_factor.clamp(0.0, 1.0);
            let jitter = rand::rng().random_range(-jitter_range..=jitter_range);
            (capped_delay + jitter).max(0.0)
        } else {
            capped_delay
        };

        Duration::from_millis(final_delay as u64)
    }
}

/// Results that can ask to be produced again
pub trait Retryable {
    /// Whether the operation should be re-run
    fn should_retry(&self) -> bool;
}

impl Retryable for RefreshOutcome {
    fn should_retry(&self) -> bool {
        !self.is_success()
    }
}

/// Final value plus how it was reached
#[derive(Debug)]
pub struct RetryResult<T> {
    /// Value of the last attempt
    pub value: T,
    /// Attempts made (1 = no re-run)
    pub attempts: u32,
    /// Time spent including delays
    pub total_duration: Duration,
}

impl<T: Retryable> RetryResult<T> {
    /// Whether the last attempt still asked for a retry
    #[must_use]
    pub fn exhausted(&self) -> bool {
        self.value.should_retry()
    }
}

/// Run `operation` until it stops asking for a retry or the budget is spent
#[allow(clippy::cast_possible_truncation)]
pub async fn with_retry<F, Fut, T>(config: &RetryConfig, mut operation: F) -> RetryResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = T>,
    T: Retryable,
{
    let start = Instant::now();
    let mut attempts = 0u32;

    loop {
        attempts += 1;
        let value = operation().await;

        if !value.should_retry() {
            if attempts > 1 {
                debug!(
                    attempts,
                    duration_ms = start.elapsed().as_millis() as u64,
                    "Operation succeeded after retries"
                );
            }
            return RetryResult {
                value,
                attempts,
                total_duration: start.elapsed(),
            };
        }

        let retry_attempt = attempts - 1;
        if retry_attempt >= config.max_retries {
            warn!(
                attempts,
                max_retries = config.max_retries,
                "Giving up until the next scheduled run"
            );
            return RetryResult {
                value,
                attempts,
                total_duration: start.elapsed(),
            };
        }

        let delay = config.delay_for_attempt(retry_attempt);
        warn!(
            attempt = attempts,
            max_retries = config.max_retries,
            delay_ms = delay.as_millis() as u64,
            "Operation asked for a retry"
        );
        tokio::time::sleep(delay).await;
    }
}
