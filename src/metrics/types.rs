// Standard library
use std::sync::Arc;
use std::time::Duration;

// 3rd party crates
use tokio::sync::RwLock;
use tokio::time::Instant;

/// Counters for document submissions
#[derive(Debug, Default, Clone)]
pub struct SubmissionMetrics {
    /// Total number of submissions attempted
    pub attempts: u64,
    /// Number of documents accepted by the registry
    pub successes: u64,
    /// Number of submissions rejected by the registry or lost in transport
    pub api_failures: u64,
    /// Number of documents or responses that could not be (de)serialized
    pub codec_failures: u64,
    /// Number of submissions abandoned while waiting for a rate limit slot
    pub cancellations: u64,
    /// Number of admissions that had to wait for a free slot
    pub throttled: u64,
    /// Total time spent waiting for free slots
    pub throttled_wait: Duration,
    /// Last successful submission time
    pub last_success: Option<Instant>,
    /// Last failure time
    pub last_failure: Option<Instant>,
}

/// Thread-safe metrics manager
#[derive(Debug, Default, Clone)]
pub struct MetricsManager {
    pub(super) metrics: Arc<RwLock<SubmissionMetrics>>,
}
