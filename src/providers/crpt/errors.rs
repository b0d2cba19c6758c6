// 3rd party crates
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiValidationError {
    #[error("base_url must be an http(s) URL, got '{0}'")]
    InvalidBaseUrl(String),

    #[error("create_path must start with '/', got '{0}'")]
    InvalidCreatePath(String),

    #[error("auth_token is still the placeholder value")]
    PlaceholderToken,

    #[error("signature_header must not be empty")]
    EmptySignatureHeader,

    #[error("timeout_secs must be greater than 0")]
    InvalidTimeout,
}
