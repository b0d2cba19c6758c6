// Standard library
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

// 3rd party crates
use async_trait::async_trait;
use tokio::time::Instant;

/// Monotonic time source used for every duration computation in the limiter.
///
/// Implementations must never go backwards. `sleep_until` is the only place a
/// caller is suspended, so a simulated clock can make waiting instantaneous.
#[async_trait]
pub trait Clock: Send + Sync + 'static {
    /// Current instant.
    fn now(&self) -> Instant;

    /// Suspends the current task until `deadline` has been reached.
    async fn sleep_until(&self, deadline: Instant);
}

/// Process-wide monotonic clock backed by the tokio timer.
///
/// Follows `tokio::time::pause` in tests, so paused-runtime tests observe
/// virtual time through this clock as well.
#[derive(Debug, Default, Clone, Copy)]
pub struct MonotonicClock;

#[async_trait]
impl Clock for MonotonicClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    async fn sleep_until(&self, deadline: Instant) {
        tokio::time::sleep_until(deadline).await;
    }
}

/// Simulated clock that only moves when told to.
///
/// Sleeping jumps the clock forward to the requested deadline instead of
/// waiting, which makes limiter runs fully deterministic. Clones share the
/// same timeline.
#[derive(Debug, Clone)]
pub struct ManualClock {
    origin: Instant,
    offset_nanos: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(origin: Instant) -> Self {
        Self {
            origin,
            offset_nanos: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Moves the clock forward by `step`.
    pub fn advance(&self, step: Duration) {
        self.offset_nanos
            .fetch_add(duration_nanos(step), Ordering::SeqCst);
    }

    /// Time elapsed since the clock was created.
    pub fn elapsed(&self) -> Duration {
        Duration::from_nanos(self.offset_nanos.load(Ordering::SeqCst))
    }

    fn advance_to(&self, deadline: Instant) {
        let target = duration_nanos(deadline.saturating_duration_since(self.origin));
        // fetch_max keeps the clock monotonic when several waiters race.
        self.offset_nanos.fetch_max(target, Ordering::SeqCst);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.elapsed()
    }

    async fn sleep_until(&self, deadline: Instant) {
        self.advance_to(deadline);
        tokio::task::yield_now().await;
    }
}

fn duration_nanos(duration: Duration) -> u64 {
    u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX)
}
