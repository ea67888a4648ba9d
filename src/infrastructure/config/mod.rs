//! Application configuration.

/// TOML settings and log level.
pub mod app_config;
/// Command line arguments.
pub mod args;

pub use app_config::{API_KEY_ENV, AppConfig, DEFAULT_BASE_URL, LogLevel};
pub use args::{CliArgs, Command};
