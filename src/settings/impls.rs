// Standard library
use std::path::{Path, PathBuf};
use std::{env, fs};

// 3rd party crates
use config::{Config, ConfigError, Environment, File, FileFormat};
use tracing::{error, info};

// Current module imports
use super::constants::{default_log_level, CONFIG_PATH_ENV, DEFAULT_CONFIG, ENV_PREFIX};
use super::errors::{SettingsError, ValidationError};
use super::types::{ConfigManager, Log, Settings, ValidatedSettings};

impl Default for Log {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Settings {
    /// Parses settings from TOML text, without environment overrides.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from_str(text, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    pub fn get_log_level(&self) -> String {
        self.log.level.to_lowercase()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        // Validate log level
        match self.get_log_level().as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => {}
            _ => return Err(ValidationError::InvalidLogLevel(self.log.level.clone())),
        }

        self.api.validate()?;
        self.rate_limit.validate()?;

        Ok(())
    }
}

impl ConfigManager {
    /// Creates a new `ConfigManager` instance by loading and validating the configuration.
    pub fn new() -> Result<Self, SettingsError> {
        let config_path: PathBuf = Self::get_config_path()?;
        Self::ensure_config_file_exists(&config_path)?;
        Self::from_path(config_path)
    }

    /// Loads and validates the configuration stored at `config_path`.
    pub fn from_path(config_path: PathBuf) -> Result<Self, SettingsError> {
        let settings: Settings = Self::load_settings(&config_path)?;

        // Validate settings before proceeding
        let settings = ValidatedSettings::new(settings).map_err(|e| {
            error!("Configuration validation failed: {}", e);
            e
        })?;

        Ok(ConfigManager {
            settings,
            config_path,
        })
    }

    /// Determines the configuration file path.
    fn get_config_path() -> Result<PathBuf, ConfigError> {
        if let Ok(path) = env::var(CONFIG_PATH_ENV) {
            Ok(PathBuf::from(path))
        } else if let Some(config_dir) = dirs::config_dir() {
            Ok(config_dir.join("crpt-client").join("config.toml"))
        } else {
            let msg: &str = "Could not determine the configuration directory";
            error!("{}", msg);
            Err(ConfigError::Message(msg.into()))
        }
    }

    /// Ensures that the configuration file exists, creating it if necessary.
    fn ensure_config_file_exists(config_path: &Path) -> Result<(), ConfigError> {
        if !config_path.exists() {
            if let Some(parent_dir) = config_path.parent() {
                fs::create_dir_all(parent_dir).map_err(|e| {
                    let msg: String = format!("Failed to create configuration directory: {}", e);
                    error!("{}", msg);
                    ConfigError::Message(msg)
                })?;
            }
            fs::write(config_path, DEFAULT_CONFIG).map_err(|e| {
                let msg: String = format!("Failed to create default configuration file: {}", e);
                error!("{}", msg);
                ConfigError::Message(msg)
            })?;
            info!("Default configuration file created at: {:?}", config_path);
        }
        Ok(())
    }

    /// Loads the settings from the configuration file and environment variables.
    fn load_settings(config_path: &Path) -> Result<Settings, ConfigError> {
        let config_file: &str = config_path.to_str().ok_or_else(|| {
            let msg: &str = "Configuration file path contains invalid UTF-8 characters";
            error!("{}", msg);
            ConfigError::Message(msg.into())
        })?;

        let settings: Config = Config::builder()
            .add_source(File::with_name(config_file))
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    /// Provides the validated settings.
    pub fn get_settings(&self) -> &Settings {
        &self.settings
    }

    pub fn get_log_level(&self) -> String {
        self.settings.get_log_level()
    }
}

impl ValidatedSettings {
    pub fn new(settings: Settings) -> Result<Self, ValidationError> {
        settings.validate()?;
        Ok(ValidatedSettings(settings))
    }
}

// Implement Deref to allow transparent access to Settings fields
impl std::ops::Deref for ValidatedSettings {
    type Target = Settings;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
