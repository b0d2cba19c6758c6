// Standard library
use std::time::Duration;

// 3rd party crates
use tokio::time::Instant;

// Current module imports
use super::types::{MetricsManager, SubmissionMetrics};

impl MetricsManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the start of a submission
    pub async fn record_attempt(&self) {
        self.metrics.write().await.attempts += 1;
    }

    /// Records an admission that waited `waited` for a free slot
    pub async fn record_admission(&self, waited: Duration) {
        if waited.is_zero() {
            return;
        }
        let mut metrics = self.metrics.write().await;
        metrics.throttled += 1;
        metrics.throttled_wait += waited;
    }

    /// Records a document accepted by the registry
    pub async fn record_success(&self) {
        let mut metrics = self.metrics.write().await;
        metrics.successes += 1;
        metrics.last_success = Some(Instant::now());
    }

    /// Records a registry rejection or transport failure
    pub async fn record_api_failure(&self) {
        let mut metrics = self.metrics.write().await;
        metrics.api_failures += 1;
        metrics.last_failure = Some(Instant::now());
    }

    /// Records an encoding or decoding failure
    pub async fn record_codec_failure(&self) {
        let mut metrics = self.metrics.write().await;
        metrics.codec_failures += 1;
        metrics.last_failure = Some(Instant::now());
    }

    /// Records a submission cancelled while waiting for a slot
    pub async fn record_cancellation(&self) {
        self.metrics.write().await.cancellations += 1;
    }

    /// Gets a snapshot of the current metrics
    pub async fn get_snapshot(&self) -> SubmissionMetrics {
        (*self.metrics.read().await).clone()
    }
}
