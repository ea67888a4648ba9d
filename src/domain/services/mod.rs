//! Pure domain services.

pub mod image_resolver;

pub use image_resolver::{
    AssetGroups, best_in_group, cover_image, display_image_urls, group_images, most_suited_image,
};
