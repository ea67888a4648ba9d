//! Image variant value object.

/// URL substring marking a high-density (retina) variant.
pub const RETINA_MARKER: &str = "RETINA";

/// URL substring marking the variant recommended for compact views.
/// Spelled the way the upstream service spells it.
pub const RECOMMENDATION_MARKER: &str = "RECOMENDATION";

/// One size/crop of an event image as returned by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageVariant {
    /// Aspect ratio tag such as `16_9`, if provided.
    pub ratio: Option<String>,
    /// Absolute image URL.
    pub url: String,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl ImageVariant {
    /// Creates a variant without a ratio tag.
    #[must_use]
    pub fn new(url: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            ratio: None,
            url: url.into(),
            width,
            height,
        }
    }

    /// Sets the ratio tag.
    #[must_use]
    pub fn with_ratio(mut self, ratio: impl Into<String>) -> Self {
        self.ratio = Some(ratio.into());
        self
    }

    /// Pixel area, computed without overflow.
    #[must_use]
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Returns true if the URL carries the high-resolution marker.
    #[must_use]
    pub fn is_retina(&self) -> bool {
        self.url.contains(RETINA_MARKER)
    }

    /// Returns true if the URL carries the recommendation marker.
    #[must_use]
    pub fn is_recommendation(&self) -> bool {
        self.url.contains(RECOMMENDATION_MARKER)
    }
}
