// Standard library
use std::time::Duration;

// 3rd party crates
use async_trait::async_trait;
use tokio::sync::broadcast::{self, error::TryRecvError};
use tokio::sync::Mutex;
use tracing::{debug, trace};

// Project imports
use crate::utility::clock::{Clock, MonotonicClock};

// Current module imports
use super::errors::RateLimitError;
use super::traits::RateLimiter;
use super::types::{Admission, RateLimitConfig, SlidingWindowRateLimiter, TimeWindow};
use super::window::{AdmissionWindow, Decision};

impl RateLimitConfig {
    pub fn window(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }

    pub fn validate(&self) -> Result<(), RateLimitError> {
        if self.max_requests == 0 {
            return Err(RateLimitError::InvalidConfig(
                "max_requests must be greater than 0".into(),
            ));
        }

        if self.window_ms == 0 {
            return Err(RateLimitError::InvalidConfig(
                "window_ms must be greater than 0".into(),
            ));
        }

        Ok(())
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: super::constants::default_max_requests(),
            window_ms: super::constants::default_window_ms(),
        }
    }
}

impl TimeWindow {
    pub fn duration(&self) -> Duration {
        match self {
            TimeWindow::Second => Duration::from_secs(1),
            TimeWindow::Minute => Duration::from_secs(60),
            TimeWindow::Hour => Duration::from_secs(3600),
            TimeWindow::Day => Duration::from_secs(86400),
        }
    }
}

impl SlidingWindowRateLimiter<MonotonicClock> {
    /// Creates a limiter granting at most `capacity` admissions per `window`.
    pub fn new(capacity: u32, window: Duration) -> Result<Self, RateLimitError> {
        Self::with_clock(capacity, window, MonotonicClock)
    }

    /// Creates a limiter granting at most `capacity` admissions per `unit`.
    pub fn per(capacity: u32, unit: TimeWindow) -> Result<Self, RateLimitError> {
        Self::new(capacity, unit.duration())
    }

    pub fn from_config(config: &RateLimitConfig) -> Result<Self, RateLimitError> {
        config.validate()?;
        Self::new(config.max_requests, config.window())
    }
}

impl<C: Clock> SlidingWindowRateLimiter<C> {
    /// Creates a limiter that reads time from `clock`.
    pub fn with_clock(capacity: u32, window: Duration, clock: C) -> Result<Self, RateLimitError> {
        if capacity == 0 {
            return Err(RateLimitError::InvalidConfig(
                "capacity must be greater than 0".into(),
            ));
        }

        if window.is_zero() {
            return Err(RateLimitError::InvalidConfig(
                "window must be greater than 0".into(),
            ));
        }

        if clock.now().checked_add(window).is_none() {
            return Err(RateLimitError::InvalidConfig(format!(
                "window of {window:?} is too long for the system clock"
            )));
        }

        Ok(Self {
            admissions: Mutex::new(AdmissionWindow::new(capacity as usize, window)),
            clock,
        })
    }

    pub async fn capacity(&self) -> usize {
        self.admissions.lock().await.capacity()
    }

    pub async fn window(&self) -> Duration {
        self.admissions.lock().await.window()
    }

    /// Number of admissions that could be granted right now without waiting.
    pub async fn available(&self) -> usize {
        let mut admissions = self.admissions.lock().await;
        let now = self.clock.now();
        admissions.evict(now);
        admissions.capacity() - admissions.occupied(now)
    }

    async fn wait_for_slot(
        &self,
        mut shutdown: Option<&mut broadcast::Receiver<()>>,
    ) -> Result<Admission, RateLimitError> {
        let started = self.clock.now();

        loop {
            match shutdown.as_mut().map(|rx| rx.try_recv()) {
                Some(Ok(())) | Some(Err(TryRecvError::Lagged(_))) => {
                    debug!("Shutdown requested before admission");
                    return Err(RateLimitError::Cancelled);
                }
                Some(Err(TryRecvError::Closed)) => shutdown = None,
                Some(Err(TryRecvError::Empty)) | None => {}
            }

            // The clock is read under the lock so admissions stay in chronological order.
            let decision = {
                let mut admissions = self.admissions.lock().await;
                admissions.try_admit(self.clock.now())
            };

            let deadline = match decision {
                Decision::Admitted(admitted_at) => {
                    let waited = admitted_at.saturating_duration_since(started);
                    if !waited.is_zero() {
                        debug!(
                            waited_ms = waited.as_millis() as u64,
                            "Admitted after waiting for a free slot"
                        );
                    }
                    return Ok(Admission {
                        admitted_at,
                        waited,
                    });
                }
                Decision::WaitUntil(deadline) => deadline,
            };

            trace!(
                wait_ms = deadline
                    .saturating_duration_since(self.clock.now())
                    .as_millis() as u64,
                "Rate limit reached, waiting for the oldest admission to expire"
            );

            let mut sender_gone = false;
            match shutdown.as_mut() {
                Some(rx) => {
                    tokio::select! {
                        _ = self.clock.sleep_until(deadline) => {}
                        received = rx.recv() => match received {
                            Err(broadcast::error::RecvError::Closed) => sender_gone = true,
                            _ => {
                                debug!("Shutdown requested while waiting for a slot");
                                return Err(RateLimitError::Cancelled);
                            }
                        },
                    }
                }
                None => self.clock.sleep_until(deadline).await,
            }

            if sender_gone {
                shutdown = None;
            }
        }
    }
}

#[async_trait]
impl<C: Clock> RateLimiter for SlidingWindowRateLimiter<C> {
    async fn acquire(&self) -> Result<Admission, RateLimitError> {
        self.wait_for_slot(None).await
    }

    async fn acquire_until(
        &self,
        shutdown: &mut broadcast::Receiver<()>,
    ) -> Result<Admission, RateLimitError> {
        self.wait_for_slot(Some(shutdown)).await
    }

    async fn try_acquire(&self) -> Option<Admission> {
        let mut admissions = self.admissions.lock().await;
        match admissions.try_admit(self.clock.now()) {
            Decision::Admitted(admitted_at) => Some(Admission {
                admitted_at,
                waited: Duration::ZERO,
            }),
            Decision::WaitUntil(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    // Standard library
    use std::sync::Arc;

    // 3rd party crates
    use tokio::time::{timeout, Instant};

    // Project imports
    use crate::utility::clock::ManualClock;

    use super::*;

    const WINDOW: Duration = Duration::from_secs(1);
    const SLACK: Duration = Duration::from_millis(5);

    fn assert_near(actual: Duration, expected: Duration) {
        assert!(
            actual >= expected && actual <= expected + SLACK,
            "expected ~{expected:?}, got {actual:?}"
        );
    }

    /// Spawns `count` concurrent acquirers and returns each admission offset from `start`.
    async fn burst<C: Clock>(
        limiter: Arc<SlidingWindowRateLimiter<C>>,
        count: usize,
        start: Instant,
    ) -> Vec<Duration> {
        let handles: Vec<_> = (0..count)
            .map(|_| {
                let limiter = Arc::clone(&limiter);
                tokio::spawn(async move { limiter.acquire().await })
            })
            .collect();

        let mut offsets = Vec::with_capacity(count);
        for handle in handles {
            let admission = handle.await.unwrap().unwrap();
            offsets.push(admission.admitted_at - start);
        }
        offsets.sort();
        offsets
    }

    #[test]
    fn rejects_zero_capacity() {
        let result = SlidingWindowRateLimiter::new(0, WINDOW);
        assert!(matches!(result, Err(RateLimitError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_zero_window() {
        let result = SlidingWindowRateLimiter::new(3, Duration::ZERO);
        assert!(matches!(result, Err(RateLimitError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_window_the_clock_cannot_represent() {
        let result = SlidingWindowRateLimiter::new(1, Duration::from_secs(u64::MAX));
        assert!(matches!(result, Err(RateLimitError::InvalidConfig(_))));
    }

    #[tokio::test]
    async fn try_acquire_on_a_very_long_window_reports_full() {
        let century = Duration::from_secs(86400 * 365 * 100);
        let limiter = SlidingWindowRateLimiter::new(1, century).unwrap();

        assert!(limiter.try_acquire().await.is_some());
        assert!(limiter.try_acquire().await.is_none());
    }

    #[test]
    fn config_is_validated_before_construction() {
        let config = RateLimitConfig {
            max_requests: 0,
            window_ms: 1000,
        };
        assert!(SlidingWindowRateLimiter::from_config(&config).is_err());
    }

    #[tokio::test]
    async fn per_unit_constructor_uses_unit_length() {
        let limiter = SlidingWindowRateLimiter::per(10, TimeWindow::Minute).unwrap();
        assert_eq!(limiter.window().await, Duration::from_secs(60));
        assert_eq!(limiter.capacity().await, 10);
    }

    #[tokio::test(start_paused = true)]
    async fn six_simultaneous_calls_admit_five_now_and_one_after_a_window() {
        let limiter = Arc::new(SlidingWindowRateLimiter::new(5, WINDOW).unwrap());
        let start = Instant::now();

        let offsets = burst(limiter, 6, start).await;

        assert!(offsets[..5].iter().all(|offset| offset.is_zero()));
        assert_near(offsets[5], WINDOW);
    }

    #[tokio::test(start_paused = true)]
    async fn ten_simultaneous_calls_all_complete_within_two_windows() {
        let limiter = Arc::new(SlidingWindowRateLimiter::new(5, WINDOW).unwrap());
        let start = Instant::now();

        let offsets = burst(limiter, 10, start).await;

        assert_eq!(offsets.len(), 10);
        assert!(offsets[..5].iter().all(|offset| offset.is_zero()));
        for offset in &offsets[5..] {
            assert_near(*offset, WINDOW);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn spaced_arrivals_below_the_limit_never_wait() {
        let limiter = SlidingWindowRateLimiter::new(1, Duration::from_millis(100)).unwrap();

        for _ in 0..10 {
            let admission = limiter.acquire().await.unwrap();
            assert!(admission.waited.is_zero());
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn nine_contended_calls_finish_before_an_external_deadline() {
        let limiter = Arc::new(SlidingWindowRateLimiter::new(5, WINDOW).unwrap());

        let handles: Vec<_> = (0..9)
            .map(|_| {
                let limiter = Arc::clone(&limiter);
                tokio::spawn(async move { timeout(WINDOW * 3, limiter.acquire()).await })
            })
            .collect();

        for handle in handles {
            let outcome = handle.await.unwrap();
            assert!(outcome.is_ok(), "acquire hung past its deadline");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn try_acquire_does_not_wait_or_record_when_full() {
        let limiter = SlidingWindowRateLimiter::new(2, WINDOW).unwrap();

        assert!(limiter.try_acquire().await.is_some());
        assert!(limiter.try_acquire().await.is_some());
        assert!(limiter.try_acquire().await.is_none());
        assert_eq!(limiter.available().await, 0);

        tokio::time::advance(WINDOW).await;
        assert_eq!(limiter.available().await, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_cancels_a_waiting_caller_without_recording() {
        let limiter = Arc::new(SlidingWindowRateLimiter::new(1, WINDOW).unwrap());
        limiter.acquire().await.unwrap();

        let (shutdown_tx, mut shutdown_rx) = broadcast::channel(1);
        let waiter = {
            let limiter = Arc::clone(&limiter);
            tokio::spawn(async move { limiter.acquire_until(&mut shutdown_rx).await })
        };

        tokio::time::sleep(Duration::from_millis(100)).await;
        shutdown_tx.send(()).unwrap();

        assert_eq!(waiter.await.unwrap(), Err(RateLimitError::Cancelled));

        tokio::time::advance(WINDOW).await;
        assert_eq!(limiter.available().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn closed_shutdown_channel_falls_back_to_plain_waiting() {
        let limiter = SlidingWindowRateLimiter::new(1, WINDOW).unwrap();
        limiter.acquire().await.unwrap();

        let (shutdown_tx, mut shutdown_rx) = broadcast::channel::<()>(1);
        drop(shutdown_tx);

        let admission = limiter.acquire_until(&mut shutdown_rx).await.unwrap();
        assert_near(admission.waited, WINDOW);
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_acquire_future_leaves_no_trace() {
        let limiter = SlidingWindowRateLimiter::new(1, WINDOW).unwrap();
        limiter.acquire().await.unwrap();

        let timed_out = timeout(Duration::from_millis(200), limiter.acquire()).await;
        assert!(timed_out.is_err());

        tokio::time::advance(WINDOW).await;
        assert_eq!(limiter.available().await, 1);
    }

    #[tokio::test]
    async fn identical_arrivals_on_simulated_clocks_give_identical_admissions() {
        let arrivals_ms = [0u64, 0, 0, 120, 130, 400, 900, 900, 1500, 1510, 1520, 1530];

        let mut runs = Vec::new();
        for _ in 0..2 {
            let clock = ManualClock::new();
            let origin = clock.now();
            let limiter = SlidingWindowRateLimiter::with_clock(3, WINDOW, clock.clone()).unwrap();

            let mut admitted = Vec::new();
            for &arrival in &arrivals_ms {
                let target = Duration::from_millis(arrival);
                if clock.elapsed() < target {
                    clock.advance(target - clock.elapsed());
                }
                let admission = limiter.acquire().await.unwrap();
                admitted.push(admission.admitted_at - origin);
            }
            runs.push(admitted);
        }

        assert_eq!(runs[0], runs[1]);
        assert_eq!(runs[0][3], WINDOW);
    }
}
