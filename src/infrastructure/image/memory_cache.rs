//! In-memory FIFO image cache implementation.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::domain::ports::ImageCachePort;

/// Default maximum number of images to cache in memory.
pub const DEFAULT_CACHE_SIZE: usize = 100;

/// Map plus insertion order. Both are only touched under the same lock.
#[derive(Default)]
struct Entries {
    images: HashMap<String, Arc<image::DynamicImage>>,
    order: VecDeque<String>,
}

/// In-memory cache for decoded images with first-in-first-out eviction.
///
/// Reads never change eviction order and overwriting a key keeps its
/// original position.
pub struct MemoryImageCache {
    entries: RwLock<Entries>,
    capacity: usize,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl MemoryImageCache {
    /// Creates a new cache with the specified capacity (at least one).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(Entries::default()),
            capacity: capacity.max(1),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Creates a new cache with the default capacity.
    #[must_use]
    pub fn with_default_capacity() -> Self {
        Self::new(DEFAULT_CACHE_SIZE)
    }

    /// Returns cached URLs from oldest to newest.
    #[cfg(test)]
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.entries.read().order.iter().cloned().collect()
    }

    /// Returns cache statistics.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        let hit_rate = if total > 0 {
            (hits as f64 / total as f64) * 100.0
        } else {
            0.0
        };
        CacheStats {
            hits,
            misses,
            hit_rate,
            size: self.len(),
        }
    }
}

impl Default for MemoryImageCache {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

impl std::fmt::Debug for MemoryImageCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryImageCache")
            .field("capacity", &self.capacity)
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

/// Statistics about cache performance.
#[derive(Debug, Clone)]
pub struct CacheStats {
    /// Number of cache hits.
    pub hits: u64,
    /// Number of cache misses.
    pub misses: u64,
    /// Hit rate as a percentage.
    pub hit_rate: f64,
    /// Current number of cached images.
    pub size: usize,
}

impl std::fmt::Display for CacheStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Cache: {} images, {:.1}% hit rate ({} hits, {} misses)",
            self.size, self.hit_rate, self.hits, self.misses
        )
    }
}

impl ImageCachePort for MemoryImageCache {
    fn get(&self, url: &str) -> Option<Arc<image::DynamicImage>> {
        let found = self.entries.read().images.get(url).cloned();
        if found.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!(url, "Memory cache hit");
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            trace!(url, "Memory cache miss");
        }
        found
    }

    fn put(&self, url: &str, image: Arc<image::DynamicImage>) {
        let mut entries = self.entries.write();

        if entries.images.insert(url.to_string(), image).is_some() {
            trace!(url, "Overwrote cached image");
            return;
        }

        entries.order.push_back(url.to_string());
        debug!(url, "Stored image in memory cache");

        while entries.order.len() > self.capacity {
            if let Some(oldest) = entries.order.pop_front() {
                entries.images.remove(&oldest);
                debug!(url = %oldest, "Evicted oldest image from memory cache");
            }
        }
    }

    fn contains(&self, url: &str) -> bool {
        self.entries.read().images.contains_key(url)
    }

    fn len(&self) -> usize {
        self.entries.read().images.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&self) {
        let mut entries = self.entries.write();
        entries.images.clear();
        entries.order.clear();
        debug!("Cleared memory image cache");
    }
}
