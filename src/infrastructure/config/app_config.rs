//! Application configuration.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::entities::{ApiKey, SortOption};
use crate::domain::errors::ConfigError;

use super::args::CliArgs;

const APP_NAME: &str = "event-catalog";
const APP_QUALIFIER: &str = "com";
const APP_ORGANIZATION: &str = "linuxmobile";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "TICKETMASTER_API_KEY";

/// Default catalog host.
pub const DEFAULT_BASE_URL: &str = "https://app.ticketmaster.com";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl LogLevel {
    /// Converts to tracing level.
    #[must_use]
    pub const fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration, read from TOML and overridden by CLI flags.
#[derive(Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path. Logs go to stderr when unset.
    #[serde(default)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// API key. CLI and environment values take precedence.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Catalog host.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Country filter for listings.
    #[serde(default = "default_country_code")]
    pub country_code: String,

    /// Results per page; the catalog default when unset.
    #[serde(default)]
    pub page_size: Option<u32>,

    /// Response locale.
    #[serde(default)]
    pub locale: Option<String>,

    /// Sort order used when none is requested.
    #[serde(default)]
    pub default_sort: Option<SortOption>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Maximum number of decoded images kept in memory.
    #[serde(default = "default_image_cache_capacity")]
    pub image_cache_capacity: usize,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_country_code() -> String {
    "PL".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_image_cache_capacity() -> usize {
    100
}

impl AppConfig {
    /// Loads the config file at `path`, or the default location.
    /// A missing file yields the defaults.
    ///
    /// # Errors
    /// Returns error if the file exists but cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let explicit = path.map(Path::to_path_buf);
        let Some(path) = explicit.clone().or_else(Self::default_config_path) else {
            return Ok(Self::default());
        };

        if explicit.is_none() && !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;

        let mut config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;
        config.config = Some(path);
        config.validate()?;
        Ok(config)
    }

    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(config_path) = &args.config {
            self.config = Some(config_path.clone());
        }
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(api_key) = &args.api_key {
            self.api_key = Some(api_key.clone());
        }
        if let Some(base_url) = &args.base_url {
            self.base_url.clone_from(base_url);
        }
        if let Some(country_code) = &args.country_code {
            self.country_code.clone_from(country_code);
        }
        if let Some(page_size) = args.page_size {
            self.page_size = Some(page_size);
        }
    }

    /// Checks value ranges.
    ///
    /// # Errors
    /// Returns error for a zero timeout, cache capacity or page size.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be positive".to_string(),
            ));
        }
        if self.image_cache_capacity == 0 {
            return Err(ConfigError::Invalid(
                "image_cache_capacity must be positive".to_string(),
            ));
        }
        if self.page_size == Some(0) {
            return Err(ConfigError::Invalid("page_size must be positive".to_string()));
        }
        Ok(())
    }

    /// Returns the configured API key.
    ///
    /// CLI and environment values have already replaced the file value
    /// through [`Self::merge_with_args`].
    ///
    /// # Errors
    /// Returns error if no usable key is configured.
    pub fn resolve_api_key(&self) -> Result<ApiKey, ConfigError> {
        self.api_key
            .clone()
            .and_then(ApiKey::new)
            .ok_or(ConfigError::MissingApiKey)
    }

    /// Returns default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns default config file path.
    #[must_use]
    pub fn default_config_path() -> Option<PathBuf> {
        Self::default_config_dir().map(|dir| dir.join("config.toml"))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: None,
            log_path: None,
            log_level: LogLevel::Info,
            api_key: None,
            base_url: default_base_url(),
            country_code: default_country_code(),
            page_size: None,
            locale: None,
            default_sort: None,
            request_timeout_secs: default_timeout_secs(),
            image_cache_capacity: default_image_cache_capacity(),
        }
    }
}
