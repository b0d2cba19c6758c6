// 3rd party crates
use async_trait::async_trait;
use tokio::sync::broadcast;

// Current module imports
use super::errors::RateLimitError;
use super::types::Admission;

/// Admission control in front of a throttled endpoint.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Waits until a slot is free, records the admission and returns it.
    ///
    /// Dropping the returned future before it resolves records nothing.
    async fn acquire(&self) -> Result<Admission, RateLimitError>;

    /// Like [`RateLimiter::acquire`], but gives up with
    /// [`RateLimitError::Cancelled`] once `shutdown` fires or its sender goes away.
    async fn acquire_until(
        &self,
        shutdown: &mut broadcast::Receiver<()>,
    ) -> Result<Admission, RateLimitError>;

    /// Records an admission only if a slot is free right now.
    async fn try_acquire(&self) -> Option<Admission>;
}
