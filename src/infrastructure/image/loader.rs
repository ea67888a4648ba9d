//! Async image loading orchestrator.
//!
//! Memory cache first, then the network through the shared transport.

use std::sync::Arc;

use bytes::Bytes;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::domain::errors::TransportError;
use crate::domain::ports::{CacheError, CacheResult, ImageCachePort, Transport};

/// Where a loaded image came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource {
    /// Served from the in-memory cache.
    MemoryCache,
    /// Downloaded and decoded.
    Network,
}

/// A decoded image ready for display.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    /// Image URL, also the cache key.
    pub url: String,
    /// Decoded image.
    pub image: Arc<image::DynamicImage>,
    /// Where the image came from.
    pub source: ImageSource,
}

/// Message sent when a prefetched image finishes loading.
#[derive(Debug, Clone)]
pub struct ImageLoadedEvent {
    /// The image URL.
    pub url: String,
    /// The loaded image, or the failure.
    pub result: Result<LoadedImage, CacheError>,
}

/// Loads images through the shared cache.
///
/// Every cache miss triggers its own download; there is no queue or cap.
#[derive(Clone)]
pub struct ImageLoader {
    cache: Arc<dyn ImageCachePort>,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for ImageLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageLoader")
            .field("cached", &self.cache.len())
            .finish_non_exhaustive()
    }
}

impl ImageLoader {
    /// Creates a loader over `cache` fetching misses with `transport`.
    #[must_use]
    pub fn new(cache: Arc<dyn ImageCachePort>, transport: Arc<dyn Transport>) -> Self {
        Self { cache, transport }
    }

    /// Returns the cache backing this loader.
    #[must_use]
    pub fn cache(&self) -> &Arc<dyn ImageCachePort> {
        &self.cache
    }

    /// Loads an image, checking the cache first.
    ///
    /// # Errors
    /// Returns error if the image cannot be downloaded or decoded.
    pub async fn load(&self, url: &str) -> CacheResult<LoadedImage> {
        if let Some(image) = self.cache.get(url) {
            return Ok(LoadedImage {
                url: url.to_string(),
                image,
                source: ImageSource::MemoryCache,
            });
        }

        debug!(url, "Downloading image from network");
        let bytes = self.download_with_retry(url).await?;

        let decoded = tokio::task::spawn_blocking(move || image::load_from_memory(&bytes))
            .await
            .map_err(|e| CacheError::DecodeError(format!("Decode task panicked: {e}")))?
            .map_err(|e| CacheError::DecodeError(format!("Failed to decode image: {e}")))?;

        let image = Arc::new(decoded);
        self.cache.put(url, image.clone());

        debug!(url, source = "network", "Image loaded successfully");

        Ok(LoadedImage {
            url: url.to_string(),
            image,
            source: ImageSource::Network,
        })
    }

    /// Starts loading every URL on its own task.
    ///
    /// Results are sent on `events`; a closed receiver is ignored so
    /// abandoned loads still complete and populate the cache.
    pub fn prefetch(&self, urls: Vec<String>, events: &mpsc::UnboundedSender<ImageLoadedEvent>) {
        for url in urls {
            if self.cache.contains(&url) {
                continue;
            }

            let loader = self.clone();
            let events = events.clone();
            tokio::spawn(async move {
                let result = loader.load(&url).await;
                if let Err(e) = &result {
                    warn!(url = %url, error = %e, "Prefetch failed");
                }
                let _ = events.send(ImageLoadedEvent { url, result });
            });
        }
    }

    /// A failed exchange is retried once before giving up.
    async fn download_with_retry(&self, url: &str) -> CacheResult<Bytes> {
        match self.download(url).await {
            Err(CacheError::NetworkError(first)) => {
                debug!(url, error = %first, "Image download failed, retrying once");
                self.download(url).await
            }
            other => other,
        }
    }

    async fn download(&self, url: &str) -> CacheResult<Bytes> {
        let response = self
            .transport
            .request(url)
            .await
            .map_err(|e: TransportError| CacheError::NetworkError(format!("Request failed: {e}")))?;

        if !response.is_success() {
            return Err(CacheError::Status(response.status));
        }

        Ok(response.body)
    }
}
