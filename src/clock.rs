//! Time and latency capability.
//!
//! DESIGN
//! ======
//! Services never read the wall clock or call `tokio::time::sleep` directly.
//! They go through an injected `Clock`, so production wiring keeps the fixed
//! simulated round-trip delays while tests run with a `ManualClock` that
//! resolves every sleep immediately and pins `now`.

use std::sync::Mutex;
use std::time::Duration;

use time::OffsetDateTime;

/// Source of "now" plus the suspension point used to model network latency.
#[async_trait::async_trait]
pub trait Clock: Send + Sync {
    /// Current UTC time.
    fn now(&self) -> OffsetDateTime;

    /// Suspend the calling task for `duration`. A zero duration returns at once.
    async fn sleep(&self, duration: Duration);
}

/// Wall clock backed by the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

#[async_trait::async_trait]
impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }

    async fn sleep(&self, duration: Duration) {
        if duration.is_zero() {
            return;
        }
        tokio::time::sleep(duration).await;
    }
}

/// Deterministic clock for tests: fixed `now`, instant sleeps.
///
/// Every requested sleep is recorded so a test can assert which latency an
/// operation modeled without actually waiting for it.
#[derive(Debug)]
pub struct ManualClock {
    inner: Mutex<ManualInner>,
}

#[derive(Debug)]
struct ManualInner {
    now: OffsetDateTime,
    sleeps: Vec<Duration>,
}

impl ManualClock {
    #[must_use]
    pub fn new(now: OffsetDateTime) -> Self {
        Self { inner: Mutex::new(ManualInner { now, sleeps: Vec::new() }) }
    }

    pub fn set_now(&self, now: OffsetDateTime) {
        self.lock().now = now;
    }

    pub fn advance(&self, by: Duration) {
        let mut inner = self.lock();
        inner.now += by;
    }

    /// Durations passed to `sleep`, oldest first.
    #[must_use]
    pub fn sleeps(&self) -> Vec<Duration> {
        self.lock().sleeps.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ManualInner> {
        self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait::async_trait]
impl Clock for ManualClock {
    fn now(&self) -> OffsetDateTime {
        self.lock().now
    }

    async fn sleep(&self, duration: Duration) {
        self.lock().sleeps.push(duration);
    }
}

/// Milliseconds since the Unix epoch for `at`, clamped to zero for pre-epoch times.
#[must_use]
pub fn epoch_millis(at: OffsetDateTime) -> i64 {
    let millis = at.unix_timestamp_nanos() / 1_000_000;
    i64::try_from(millis).unwrap_or(0).max(0)
}

#[cfg(test)]
#[path = "clock_test.rs"]
mod tests;
