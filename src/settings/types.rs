// Standard library
use std::path::PathBuf;

// 3rd party crates
use serde::Deserialize;

// Project imports
use crate::providers::crpt::types::ApiConfig;
use crate::utility::rate_limiter::types::RateLimitConfig;

// Current module imports
use super::constants::default_log_level;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Log {
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    #[serde(default)]
    pub log: Log,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
}

/// Settings that passed [`Settings::validate`].
#[derive(Debug, Clone)]
pub struct ValidatedSettings(pub(super) Settings);

/// Locates, creates and loads the configuration file.
pub struct ConfigManager {
    pub settings: ValidatedSettings,
    pub config_path: PathBuf,
}
