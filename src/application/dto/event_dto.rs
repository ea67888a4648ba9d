//! Presentation-ready event data.

use std::fmt;

use crate::domain::entities::{Detail, Listing};
use crate::domain::services::{cover_image, display_image_urls, most_suited_image};

/// One labelled line of event information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoField {
    /// Field label.
    pub label: &'static str,
    /// Field value.
    pub value: String,
}

impl InfoField {
    /// Creates a field.
    #[must_use]
    pub fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }
}

impl fmt::Display for InfoField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.value)
    }
}

/// Compact row for an event list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingSummary {
    /// Event identifier.
    pub id: String,
    /// Event name.
    pub name: String,
    /// Date as `dd.MM.yyyy`, or the raw value when it does not parse.
    pub date: String,
    /// Venue name and city.
    pub place: Option<String>,
    /// Cover image URL.
    pub cover_url: Option<String>,
}

impl From<&Listing> for ListingSummary {
    fn from(listing: &Listing) -> Self {
        let date = listing
            .start
            .formatted_date()
            .unwrap_or_else(|| listing.start.local_date.clone());

        let place = listing.primary_venue().map(|venue| {
            if venue.city.is_empty() {
                venue.name.clone()
            } else {
                format!("{}, {}", venue.name, venue.city)
            }
        });

        Self {
            id: listing.id.clone(),
            name: listing.name.clone(),
            date,
            place,
            cover_url: cover_image(&listing.images).map(|image| image.url.clone()),
        }
    }
}

/// Everything a detail screen shows for one event.
#[derive(Debug, Clone, PartialEq)]
pub struct EventDetailsView {
    /// Event identifier.
    pub id: String,
    /// Event name.
    pub name: String,
    /// Large header image.
    pub hero_image_url: Option<String>,
    /// One image per asset for a gallery.
    pub image_urls: Vec<String>,
    /// Seat map image.
    pub seat_map_url: Option<String>,
    /// Information lines in display order.
    pub fields: Vec<InfoField>,
}

impl EventDetailsView {
    /// Returns the value of the field labelled `label`.
    #[must_use]
    pub fn field(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.label == label)
            .map(|field| field.value.as_str())
    }
}

impl From<&Detail> for EventDetailsView {
    fn from(detail: &Detail) -> Self {
        Self {
            id: detail.id.clone(),
            name: detail.name.clone(),
            hero_image_url: most_suited_image(&detail.images).map(|image| image.url.clone()),
            image_urls: display_image_urls(&detail.images),
            seat_map_url: detail.seat_map_url().map(str::to_string),
            fields: info_fields(detail),
        }
    }
}

fn info_fields(detail: &Detail) -> Vec<InfoField> {
    let mut fields = Vec::new();

    let date = detail
        .start
        .formatted_date()
        .unwrap_or_else(|| detail.start.local_date.clone());
    if !date.is_empty() {
        fields.push(InfoField::new("Date", date));
    }
    if let Some(time) = detail.start.formatted_time() {
        fields.push(InfoField::new("Time", time));
    }

    if let Some(venue) = detail.primary_venue() {
        if !venue.name.is_empty() {
            fields.push(InfoField::new("Venue", venue.name.as_str()));
        }
        if let Some(address) = venue.address.as_deref().filter(|a| !a.is_empty()) {
            fields.push(InfoField::new("Address", address));
        }
        if !venue.city.is_empty() {
            fields.push(InfoField::new("City", venue.city.as_str()));
        }
        if !venue.country.is_empty() {
            fields.push(InfoField::new("Country", venue.country.as_str()));
        }
    }

    if let Some(price) = detail.min_price() {
        fields.push(InfoField::new(
            "Price from",
            format!("{:.2} {}", price.min, price.currency),
        ));
    }

    if let Some(classification) = detail.primary_classification() {
        fields.push(InfoField::new(
            "Genre",
            classification.segment.name.as_str(),
        ));
    }

    if !detail.attractions.is_empty() {
        fields.push(InfoField::new("Artists", detail.attractions.join(", ")));
    }

    fields
}
