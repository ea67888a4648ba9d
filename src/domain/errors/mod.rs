//! Domain error types.

mod config_error;
mod fetch_error;

pub use config_error::ConfigError;
pub use fetch_error::{FetchError, TransportError};
