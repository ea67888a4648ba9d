//! Port definition for image caching.

use std::sync::Arc;

/// Result type for image loading operations.
pub type CacheResult<T> = std::result::Result<T, CacheError>;

/// Errors that can occur while loading an image into the cache.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CacheError {
    /// Image server answered with a non-2xx status.
    #[error("HTTP {0}")]
    Status(u16),
    /// Failed to decode image.
    #[error("Decode error: {0}")]
    DecodeError(String),
    /// Network error during download.
    #[error("Network error: {0}")]
    NetworkError(String),
}

/// Port for decoded image caching keyed by image URL.
///
/// Implementations must be thread-safe and every mutation must be atomic
/// with respect to concurrent readers. Absent keys never raise.
pub trait ImageCachePort: Send + Sync {
    /// Returns the cached image for `url`, if any.
    fn get(&self, url: &str) -> Option<Arc<image::DynamicImage>>;

    /// Inserts or overwrites the image for `url`.
    fn put(&self, url: &str, image: Arc<image::DynamicImage>);

    /// Returns true if `url` is cached.
    fn contains(&self, url: &str) -> bool;

    /// Returns the current number of cached images.
    fn len(&self) -> usize;

    /// Returns true if the cache is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the maximum number of cached images.
    fn capacity(&self) -> usize;

    /// Clears all images from the cache.
    fn clear(&self);
}
