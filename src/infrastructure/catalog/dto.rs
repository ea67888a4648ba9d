//! Catalog API response structures.

use serde::Deserialize;

use crate::domain::entities::{
    Classification, Detail, EventStart, ImageVariant, Listing, PageCursor, PriceRange, SeatMap,
    Segment, Venue,
};

/// Page of events from the search endpoint.
#[derive(Debug, Deserialize)]
pub struct EventPageResponse {
    /// Embedded events. Omitted by the catalog when a page is empty.
    #[serde(rename = "_embedded", default)]
    pub embedded: Option<EmbeddedEvents>,
    /// Navigation links.
    #[serde(rename = "_links", default)]
    pub links: Option<PageLinks>,
}

impl EventPageResponse {
    /// Returns the next-page cursor, if the page links to one.
    #[must_use]
    pub fn next_cursor(&self) -> Option<PageCursor> {
        self.links
            .as_ref()
            .and_then(|links| links.next.as_ref())
            .and_then(|next| PageCursor::new(next.href.clone()))
    }

    /// Converts the embedded events into listings.
    #[must_use]
    pub fn into_listings(self) -> Vec<Listing> {
        self.embedded
            .map(|embedded| embedded.events.into_iter().map(Listing::from).collect())
            .unwrap_or_default()
    }
}

/// `_embedded` object of a page.
#[derive(Debug, Deserialize)]
pub struct EmbeddedEvents {
    /// Events on the page.
    #[serde(default)]
    pub events: Vec<EventResponse>,
}

/// `_links` object of a page.
#[derive(Debug, Deserialize)]
pub struct PageLinks {
    /// Link to the following page.
    pub next: Option<Link>,
}

/// A single HAL link.
#[derive(Debug, Deserialize)]
pub struct Link {
    /// Path and query of the linked resource.
    pub href: String,
}

/// One event inside a page.
#[derive(Debug, Deserialize)]
pub struct EventResponse {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub images: Vec<ImageResponse>,
    pub dates: DatesResponse,
    #[serde(rename = "_embedded", default)]
    pub embedded: Option<EventEmbedded>,
}

/// Image variant as sent by the catalog.
#[derive(Debug, Deserialize)]
pub struct ImageResponse {
    pub ratio: Option<String>,
    pub url: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Deserialize)]
pub struct DatesResponse {
    pub start: StartResponse,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartResponse {
    #[serde(default)]
    pub local_date: String,
    pub local_time: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EventEmbedded {
    #[serde(default)]
    pub venues: Vec<VenueResponse>,
    #[serde(default)]
    pub attractions: Vec<NamedResponse>,
}

#[derive(Debug, Deserialize)]
pub struct VenueResponse {
    #[serde(default)]
    pub name: String,
    pub city: Option<NamedResponse>,
    pub address: Option<AddressResponse>,
    pub country: Option<NamedResponse>,
}

#[derive(Debug, Deserialize)]
pub struct NamedResponse {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct AddressResponse {
    pub line1: String,
}

/// Full detail record of one event.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailResponse {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub images: Vec<ImageResponse>,
    pub dates: DatesResponse,
    #[serde(rename = "_embedded", default)]
    pub embedded: Option<EventEmbedded>,
    #[serde(default)]
    pub price_ranges: Vec<PriceRangeResponse>,
    #[serde(default)]
    pub classifications: Vec<ClassificationResponse>,
    pub seatmap: Option<SeatMapResponse>,
}

#[derive(Debug, Deserialize)]
pub struct PriceRangeResponse {
    pub currency: String,
    pub min: f64,
}

#[derive(Debug, Deserialize)]
pub struct ClassificationResponse {
    #[serde(default)]
    pub primary: bool,
    pub segment: SegmentResponse,
}

#[derive(Debug, Deserialize)]
pub struct SegmentResponse {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatMapResponse {
    #[serde(default)]
    pub id: String,
    pub static_url: String,
}

impl From<ImageResponse> for ImageVariant {
    fn from(image: ImageResponse) -> Self {
        Self {
            ratio: image.ratio.filter(|ratio| !ratio.is_empty()),
            url: image.url,
            width: image.width,
            height: image.height,
        }
    }
}

impl From<StartResponse> for EventStart {
    fn from(start: StartResponse) -> Self {
        Self {
            local_date: start.local_date,
            local_time: start.local_time,
        }
    }
}

impl From<VenueResponse> for Venue {
    fn from(venue: VenueResponse) -> Self {
        Self {
            name: venue.name,
            city: venue.city.map(|city| city.name).unwrap_or_default(),
            address: venue.address.map(|address| address.line1),
            country: venue.country.map(|country| country.name).unwrap_or_default(),
        }
    }
}

impl From<EventResponse> for Listing {
    fn from(event: EventResponse) -> Self {
        let embedded = event.embedded.unwrap_or_default();
        Self {
            id: event.id,
            name: event.name,
            images: event.images.into_iter().map(ImageVariant::from).collect(),
            start: event.dates.start.into(),
            venues: embedded.venues.into_iter().map(Venue::from).collect(),
        }
    }
}

impl From<DetailResponse> for Detail {
    fn from(detail: DetailResponse) -> Self {
        let embedded = detail.embedded.unwrap_or_default();
        Self {
            id: detail.id,
            name: detail.name,
            images: detail.images.into_iter().map(ImageVariant::from).collect(),
            start: detail.dates.start.into(),
            venues: embedded.venues.into_iter().map(Venue::from).collect(),
            attractions: embedded
                .attractions
                .into_iter()
                .map(|attraction| attraction.name)
                .collect(),
            price_ranges: detail
                .price_ranges
                .into_iter()
                .map(|range| PriceRange {
                    currency: range.currency,
                    min: range.min,
                })
                .collect(),
            classifications: detail
                .classifications
                .into_iter()
                .map(|classification| Classification {
                    primary: classification.primary,
                    segment: Segment {
                        id: classification.segment.id,
                        name: classification.segment.name,
                    },
                })
                .collect(),
            seat_map: detail.seatmap.map(|map| SeatMap {
                id: map.id,
                static_url: map.static_url,
            }),
        }
    }
}
