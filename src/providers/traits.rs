// 3rd party crates
use async_trait::async_trait;

// Current module imports
use super::errors::ApiError;
use super::types::Signature;

/// Performs the network call for one already-admitted submission.
///
/// Where the signature ends up in the outgoing request is up to the
/// implementation.
///
/// # Example Implementation
///
/// ```rust
/// # use async_trait::async_trait;
/// # use crpt_client::providers::{ApiError, RequestExecutor, Signature};
/// struct Echo;
///
/// #[async_trait]
/// impl RequestExecutor for Echo {
///     async fn send(&self, encoded: Vec<u8>, _signature: &Signature) -> Result<Vec<u8>, ApiError> {
///         Ok(encoded)
///     }
/// }
/// ```
#[async_trait]
pub trait RequestExecutor: Send + Sync {
    /// Rejects a signature this executor could never transmit.
    ///
    /// Called before a rate limit slot is taken, so an unusable signature
    /// costs no quota. Accepts everything by default.
    fn check_signature(&self, _signature: &Signature) -> Result<(), ApiError> {
        Ok(())
    }

    /// Sends `encoded` with `signature` attached.
    ///
    /// # Returns
    ///
    /// * `Ok(body)` - Raw body of a 2xx response
    /// * `Err(ApiError::Status { .. })` - Any other status, with the raw body
    /// * `Err(ApiError::Transport { .. })` - The request never got an answer
    async fn send(&self, encoded: Vec<u8>, signature: &Signature) -> Result<Vec<u8>, ApiError>;
}
