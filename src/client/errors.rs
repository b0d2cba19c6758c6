// 3rd party crates
use thiserror::Error;

// Project imports
use crate::documents::errors::CodecError;
use crate::providers::errors::ApiError;
use crate::utility::rate_limiter::errors::RateLimitError;

/// Everything a submission can fail with. Collaborator errors pass through unchanged.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    RateLimit(#[from] RateLimitError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Codec(#[from] CodecError),
}

impl ClientError {
    /// Whether the caller gave up while waiting for a rate limit slot.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ClientError::RateLimit(RateLimitError::Cancelled))
    }
}
