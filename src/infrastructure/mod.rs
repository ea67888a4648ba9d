//! Infrastructure layer with external service adapters.

/// Event catalog client.
pub mod catalog;
/// Application configuration.
pub mod config;
/// Startup wiring.
pub mod context;
/// HTTP transport.
pub mod http;
/// Image caching and loading.
pub mod image;

pub use self::catalog::{CatalogClient, CatalogEndpoint};
pub use self::config::{AppConfig, CliArgs, Command, LogLevel};
pub use self::context::{AppContext, ContextError};
pub use self::http::ReqwestTransport;
pub use self::image::{CacheStats, ImageLoadedEvent, ImageLoader, ImageSource, LoadedImage, MemoryImageCache};
