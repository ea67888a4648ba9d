//! Selection of the images to display from catalog image variants.
//!
//! The catalog returns several crops and sizes of the same photo. Their
//! file names share a prefix up to the first [`ASSET_SEPARATOR`], which is
//! used here as the asset identity.

use std::collections::BTreeMap;

use crate::domain::entities::ImageVariant;

/// Separator between the asset identifier and the variant suffix in file names.
pub const ASSET_SEPARATOR: char = '_';

/// Variants grouped by asset identifier.
pub type AssetGroups = BTreeMap<String, Vec<ImageVariant>>;

/// Derives the asset identifier from an image URL.
///
/// Takes the last path segment (ignoring query and fragment) and truncates
/// it at the first separator. Returns `None` when there is no file name or
/// the identifier part is empty.
#[must_use]
pub fn asset_id(url: &str) -> Option<&str> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let (_, file_name) = path.rsplit_once('/')?;
    let id = file_name
        .split_once(ASSET_SEPARATOR)
        .map_or(file_name, |(id, _)| id);

    if id.is_empty() { None } else { Some(id) }
}

/// Groups variants by asset identifier, dropping unparseable URLs.
#[must_use]
pub fn group_images(images: &[ImageVariant]) -> AssetGroups {
    let mut groups = AssetGroups::new();
    for image in images {
        if let Some(id) = asset_id(&image.url) {
            groups.entry(id.to_string()).or_default().push(image.clone());
        }
    }
    groups
}

/// Picks the representative of one group.
///
/// A single member is always chosen. Otherwise the largest retina variant
/// wins and a group without retina variants yields nothing.
#[must_use]
pub fn best_in_group(group: &[ImageVariant]) -> Option<&ImageVariant> {
    match group {
        [] => None,
        [only] => Some(only),
        _ => group
            .iter()
            .filter(|image| image.is_retina())
            .max_by_key(|image| image.area()),
    }
}

/// Returns one URL per distinct asset, in group iteration order.
#[must_use]
pub fn display_image_urls(images: &[ImageVariant]) -> Vec<String> {
    group_images(images)
        .values()
        .filter_map(|group| best_in_group(group))
        .map(|image| image.url.clone())
        .collect()
}

/// Picks a single hero image: the largest retina variant, else the largest.
#[must_use]
pub fn most_suited_image(images: &[ImageVariant]) -> Option<&ImageVariant> {
    images
        .iter()
        .filter(|image| image.is_retina())
        .max_by_key(|image| image.area())
        .or_else(|| images.iter().max_by_key(|image| image.area()))
}

/// Picks the image for compact list rows: the recommended variant, else
/// the smallest one.
#[must_use]
pub fn cover_image(images: &[ImageVariant]) -> Option<&ImageVariant> {
    images
        .iter()
        .find(|image| image.is_recommendation())
        .or_else(|| images.iter().min_by_key(|image| image.area()))
}
