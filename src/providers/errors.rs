// 3rd party crates
use thiserror::Error;

/// Failures reported by a [`RequestExecutor`](super::RequestExecutor).
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Registry responded with HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Request to '{url}' failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP client error: {0}")]
    HttpClientBuild(#[from] reqwest::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeaderValue(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Invalid header name: {0}")]
    InvalidHeaderName(#[from] reqwest::header::InvalidHeaderName),
}

impl ApiError {
    /// HTTP status of a rejected request, if the registry answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
