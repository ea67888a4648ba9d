//! Event listing entities.

use chrono::NaiveDate;

use super::ImageVariant;

const WIRE_DATE_FORMAT: &str = "%Y-%m-%d";
const DISPLAY_DATE_FORMAT: &str = "%d.%m.%Y";

/// Local start date and optional time of an event.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EventStart {
    /// Date as sent by the catalog, `yyyy-MM-dd`.
    pub local_date: String,
    /// Time as sent by the catalog, `HH:mm:ss`.
    pub local_time: Option<String>,
}

impl EventStart {
    /// Creates a start with a date and no time.
    #[must_use]
    pub fn new(local_date: impl Into<String>) -> Self {
        Self {
            local_date: local_date.into(),
            local_time: None,
        }
    }

    /// Sets the local time.
    #[must_use]
    pub fn with_time(mut self, local_time: impl Into<String>) -> Self {
        self.local_time = Some(local_time.into());
        self
    }

    /// Parses the local date.
    #[must_use]
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.local_date, WIRE_DATE_FORMAT).ok()
    }

    /// Returns the date as `dd.MM.yyyy`, or `None` if it does not parse.
    #[must_use]
    pub fn formatted_date(&self) -> Option<String> {
        self.date()
            .map(|date| date.format(DISPLAY_DATE_FORMAT).to_string())
    }

    /// Returns the time trimmed to `HH:mm`.
    #[must_use]
    pub fn formatted_time(&self) -> Option<&str> {
        let time = self.local_time.as_deref()?;
        if time.is_empty() {
            return None;
        }
        Some(time.get(..5).unwrap_or(time))
    }
}

/// Venue hosting an event.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Venue {
    /// Venue name.
    pub name: String,
    /// City name.
    pub city: String,
    /// First address line.
    pub address: Option<String>,
    /// Country name.
    pub country: String,
}

impl Venue {
    /// Creates a venue without an address.
    #[must_use]
    pub fn new(name: impl Into<String>, city: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            city: city.into(),
            address: None,
            country: country.into(),
        }
    }

    /// Sets the address line.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }
}

/// One event as it appears in a page of results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    /// Catalog identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Every image variant attached to the event.
    pub images: Vec<ImageVariant>,
    /// Start date/time.
    pub start: EventStart,
    /// Venues, usually exactly one.
    pub venues: Vec<Venue>,
}

impl Listing {
    /// Returns the first venue.
    #[must_use]
    pub fn primary_venue(&self) -> Option<&Venue> {
        self.venues.first()
    }
}
