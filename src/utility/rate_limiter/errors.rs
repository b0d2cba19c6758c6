// 3rd party crates
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RateLimitError {
    #[error("Invalid rate limit configuration: {0}")]
    InvalidConfig(String),

    #[error("Waiting for a rate limit slot was cancelled")]
    Cancelled,
}
