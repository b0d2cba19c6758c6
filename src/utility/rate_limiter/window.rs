// Standard library
use std::collections::VecDeque;
use std::time::Duration;

// 3rd party crates
use tokio::time::Instant;

/// Stand-in deadline for an expiry the platform clock cannot represent.
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

/// Outcome of a single admission attempt against the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The admission was recorded at the given instant.
    Admitted(Instant),
    /// The window is full; the oldest entry expires at this instant.
    WaitUntil(Instant),
}

/// Chronological record of recent admissions.
///
/// An admission made at `t` occupies a slot for `[t, t + window)`. Entries are
/// appended in time order, so expiry is always a prefix of the queue.
#[derive(Debug)]
pub struct AdmissionWindow {
    capacity: usize,
    window: Duration,
    admissions: VecDeque<Instant>,
}

impl AdmissionWindow {
    pub fn new(capacity: usize, window: Duration) -> Self {
        Self {
            capacity,
            window,
            admissions: VecDeque::with_capacity(capacity),
        }
    }

    /// Drops every admission that no longer falls inside the window ending at `now`.
    pub fn evict(&mut self, now: Instant) {
        while let Some(&oldest) = self.admissions.front() {
            if now.saturating_duration_since(oldest) >= self.window {
                self.admissions.pop_front();
            } else {
                break;
            }
        }
    }

    /// Evicts expired entries, then records an admission at `now` if a slot is free.
    pub fn try_admit(&mut self, now: Instant) -> Decision {
        self.evict(now);

        if self.admissions.len() < self.capacity {
            self.admissions.push_back(now);
            return Decision::Admitted(now);
        }

        // A missing front is only reachable with a zero capacity, which construction rejects.
        let deadline = self
            .admissions
            .front()
            .and_then(|&oldest| oldest.checked_add(self.window))
            .or_else(|| now.checked_add(FAR_FUTURE))
            .unwrap_or(now);

        Decision::WaitUntil(deadline)
    }

    /// Number of admissions still inside the window ending at `now`.
    pub fn occupied(&self, now: Instant) -> usize {
        self.admissions
            .iter()
            .filter(|&&at| now.saturating_duration_since(at) < self.window)
            .count()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}
