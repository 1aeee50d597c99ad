//! Refresh cycle as a scheduled task
//!
//! Wraps [`RefreshService`] for the daemon:
//! - a tick that arrives while a cycle is still running is skipped
//! - a cycle that reports `Retry` is re-run with exponential backoff

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use application::{RefreshOutcome, RefreshService, RefreshTrigger};
use tracing::{debug, info, warn};

use crate::retry::{RetryConfig, RetryResult, with_retry};

/// Task name for the periodic refresh
pub const REFRESH_TASK: &str = "pws_refresh";

/// Future returned by scheduler jobs
pub type TaskFuture = Pin<Box<dyn Future<Output = Result<(), String>> + Send>>;

/// Clears the in-flight flag when a cycle ends, even by panic
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Refresh cycles with overlap coalescing and backoff
#[derive(Debug, Clone)]
pub struct RefreshTask {
    service: Arc<RefreshService>,
    retry: RetryConfig,
    in_flight: Arc<AtomicBool>,
}

impl RefreshTask {
    /// Create a refresh task
    #[must_use]
    pub fn new(service: Arc<RefreshService>, retry: RetryConfig) -> Self {
        Self {
            service,
            retry,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether a cycle is running right now
    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Run one cycle, re-running it while it asks for a retry
    ///
    /// Returns `None` without doing anything when another cycle is in flight.
    pub async fn run_once(&self, trigger: RefreshTrigger) -> Option<RetryResult<RefreshOutcome>> {
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            info!(%trigger, "Previous refresh still running, skipping");
            return None;
        };

        debug!(%trigger, "Refresh cycle starting");
        let result = with_retry(&self.retry, || self.service.run(trigger)).await;
        if result.exhausted() {
            warn!(attempts = result.attempts, "Refresh still failing, keeping stored data");
        }
        Some(result)
    }

    /// Closure suitable for `TaskScheduler::add_task`
    ///
    /// The job fails only when the retry budget is spent.
    pub fn job(&self) -> impl Fn() -> TaskFuture + Send + Sync + 'static {
        let task = self.clone();
        move || {
            let task = task.clone();
            Box::pin(async move {
                match task.run_once(RefreshTrigger::Scheduled).await {
                    Some(result) if result.exhausted() => Err(format!(
                        "refresh still failing after {} attempts",
                        result.attempts
                    )),
                    Some(_) | None => Ok(()),
                }
            })
        }
    }
}
