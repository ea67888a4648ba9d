//! Configuration error types.

use std::path::PathBuf;

use thiserror::Error;

/// Configuration loading error variants.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No API key in arguments, environment or config file.
    #[error("no API key configured (use --api-key, TICKETMASTER_API_KEY or the config file)")]
    MissingApiKey,

    /// Config file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema.
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: toml::de::Error,
    },

    /// A value is out of range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
