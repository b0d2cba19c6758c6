// Standard library
use std::time::Duration;

// 3rd party crates
use serde::Deserialize;
use tokio::sync::Mutex;
use tokio::time::Instant;

// Project imports
use crate::utility::clock::{Clock, MonotonicClock};

// Current module imports
use super::constants::{default_max_requests, default_window_ms};
use super::window::AdmissionWindow;

/// Rate limiting configuration for the registry endpoint
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Maximum number of requests per time window
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,
    /// Time window in milliseconds
    #[serde(default = "default_window_ms")]
    pub window_ms: u64,
}

/// Named window lengths, for limits expressed as "N per unit".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeWindow {
    Second,
    Minute,
    Hour,
    Day,
}

/// A granted admission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Admission {
    /// Instant the admission was recorded at.
    pub admitted_at: Instant,
    /// Time spent waiting for a free slot.
    pub waited: Duration,
}

/// Sliding-window rate limiter.
///
/// At most `capacity` admissions are granted within any trailing `window`.
/// Waiters are not served in FIFO order: whichever task re-takes the lock
/// first after a slot frees up gets it.
pub struct SlidingWindowRateLimiter<C: Clock = MonotonicClock> {
    pub(super) admissions: Mutex<AdmissionWindow>,
    pub(super) clock: C,
}
