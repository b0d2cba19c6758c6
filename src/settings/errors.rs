// 3rd party crates
use config::ConfigError;
use thiserror::Error;

// Project imports
use crate::providers::crpt::errors::ApiValidationError;
use crate::utility::rate_limiter::errors::RateLimitError;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid log level: {0}. Must be one of: error, warn, info, debug, trace")]
    InvalidLogLevel(String),
    #[error("API configuration error: {0}")]
    ApiConfig(#[from] ApiValidationError),
    #[error("Rate limit configuration error: {0}")]
    RateLimitConfig(#[from] RateLimitError),
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ConfigError),
    #[error("Configuration validation failed: {0}")]
    Validation(#[from] ValidationError),
}
