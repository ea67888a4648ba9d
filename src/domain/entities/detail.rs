//! Event detail entities.

use super::{EventStart, ImageVariant, Venue};

/// Lowest advertised price in a given currency.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRange {
    /// ISO currency code.
    pub currency: String,
    /// Minimum price.
    pub min: f64,
}

/// Classification segment (for example "Music").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Segment identifier.
    pub id: String,
    /// Segment name.
    pub name: String,
}

/// Classification record of an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Whether the catalog flags this classification as primary.
    pub primary: bool,
    /// Segment of the classification.
    pub segment: Segment,
}

/// Static seat map image reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatMap {
    /// Seat map identifier.
    pub id: String,
    /// Static image URL.
    pub static_url: String,
}

/// Full record for a single event.
#[derive(Debug, Clone, PartialEq)]
pub struct Detail {
    /// Catalog identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Every image variant attached to the event.
    pub images: Vec<ImageVariant>,
    /// Start date/time.
    pub start: EventStart,
    /// Venues.
    pub venues: Vec<Venue>,
    /// Names of performing attractions.
    pub attractions: Vec<String>,
    /// Price ranges, empty if the catalog has none.
    pub price_ranges: Vec<PriceRange>,
    /// Classifications in catalog order.
    pub classifications: Vec<Classification>,
    /// Seat map, if any.
    pub seat_map: Option<SeatMap>,
}

impl Detail {
    /// Returns the lowest price across all ranges.
    #[must_use]
    pub fn min_price(&self) -> Option<&PriceRange> {
        self.price_ranges
            .iter()
            .filter(|range| range.min.is_finite())
            .min_by(|a, b| a.min.total_cmp(&b.min))
    }

    /// Returns the primary classification: the first one listed.
    ///
    /// The per-record `primary` flag is kept on [`Classification`] but does
    /// not take part in the choice.
    #[must_use]
    pub fn primary_classification(&self) -> Option<&Classification> {
        self.classifications.first()
    }

    /// Returns the seat map image URL.
    #[must_use]
    pub fn seat_map_url(&self) -> Option<&str> {
        self.seat_map.as_ref().map(|map| map.static_url.as_str())
    }

    /// Returns the first venue.
    #[must_use]
    pub fn primary_venue(&self) -> Option<&Venue> {
        self.venues.first()
    }
}
