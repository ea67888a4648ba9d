mod event_catalog_port;
mod image_cache_port;
mod transport_port;

pub use event_catalog_port::EventCatalogPort;
pub use image_cache_port::{CacheError, CacheResult, ImageCachePort};
pub use transport_port::{Transport, TransportResponse};
