//! Domain layer with core business entities, port definitions and pure services.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;
/// Image selection services.
pub mod services;

pub use entities::{Detail, ImageVariant, Listing, SortOption};
pub use errors::{ConfigError, FetchError, TransportError};
pub use ports::{EventCatalogPort, ImageCachePort, Transport};
