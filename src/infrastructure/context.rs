//! Process-wide wiring of the catalog client and image pipeline.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use super::catalog::{CatalogClient, CatalogEndpoint};
use super::config::AppConfig;
use super::http::ReqwestTransport;
use super::image::{ImageLoader, MemoryImageCache};
use crate::domain::errors::{ConfigError, FetchError, TransportError};
use crate::domain::ports::{EventCatalogPort, Transport};

/// Failure while assembling the context.
#[derive(Debug, Error)]
pub enum ContextError {
    /// Configuration is incomplete.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Endpoint could not be built.
    #[error(transparent)]
    Endpoint(#[from] FetchError),

    /// HTTP client could not be built.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Shared services created once at startup.
///
/// One transport serves both the catalog and image downloads, and one
/// cache backs every image consumer.
pub struct AppContext {
    catalog: Arc<CatalogClient>,
    image_cache: Arc<MemoryImageCache>,
    image_loader: ImageLoader,
}

impl AppContext {
    /// Builds the context with the production transport.
    ///
    /// # Errors
    /// Returns error if no API key is configured or the HTTP client fails.
    pub fn new(config: &AppConfig) -> Result<Self, ContextError> {
        let transport = Arc::new(ReqwestTransport::with_timeout(config.request_timeout_secs)?);
        Self::with_transport(config, transport)
    }

    /// Builds the context over the given transport.
    ///
    /// # Errors
    /// Returns error if no API key is configured or the base URL is invalid.
    pub fn with_transport(
        config: &AppConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, ContextError> {
        let api_key = config.resolve_api_key()?;
        let endpoint = CatalogEndpoint::new(&config.base_url, api_key)?
            .with_country_code(config.country_code.clone())
            .with_page_size(config.page_size)
            .with_locale(config.locale.clone());

        let catalog = Arc::new(CatalogClient::new(transport.clone(), endpoint));
        let image_cache = Arc::new(MemoryImageCache::new(config.image_cache_capacity));
        let image_loader = ImageLoader::new(image_cache.clone(), transport);

        info!(
            base_url = %config.base_url,
            country = %config.country_code,
            cache_capacity = config.image_cache_capacity,
            "Application context ready"
        );

        Ok(Self {
            catalog,
            image_cache,
            image_loader,
        })
    }

    /// Catalog client as its port.
    #[must_use]
    pub fn catalog(&self) -> Arc<dyn EventCatalogPort> {
        self.catalog.clone()
    }

    /// Shared image cache.
    #[must_use]
    pub fn image_cache(&self) -> &Arc<MemoryImageCache> {
        &self.image_cache
    }

    /// Image loader backed by the shared cache.
    #[must_use]
    pub fn image_loader(&self) -> &ImageLoader {
        &self.image_loader
    }
}
