//! Image handling infrastructure.
//!
//! This module provides:
//! - Memory caching with FIFO eviction
//! - Async image loading pipeline

pub mod loader;
pub mod memory_cache;

pub use loader::{ImageLoadedEvent, ImageLoader, ImageSource, LoadedImage};
pub use memory_cache::{CacheStats, DEFAULT_CACHE_SIZE, MemoryImageCache};
