//! Sort orders accepted by the catalog search endpoint.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Sort order for event listings.
///
/// `Random` has no direction; the catalog rejects `random,asc`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
#[allow(missing_docs)]
pub enum SortOption {
    NameAsc,
    NameDesc,
    DateAsc,
    DateDesc,
    RelevanceAsc,
    RelevanceDesc,
    VenueNameAsc,
    VenueNameDesc,
    OnSaleStartDateAsc,
    Random,
}

impl SortOption {
    /// Every option, in display order.
    pub const ALL: [Self; 10] = [
        Self::NameAsc,
        Self::NameDesc,
        Self::DateAsc,
        Self::DateDesc,
        Self::RelevanceAsc,
        Self::RelevanceDesc,
        Self::VenueNameAsc,
        Self::VenueNameDesc,
        Self::OnSaleStartDateAsc,
        Self::Random,
    ];

    /// Value of the `sort` query parameter.
    #[must_use]
    pub const fn as_query_value(self) -> &'static str {
        match self {
            Self::NameAsc => "name,asc",
            Self::NameDesc => "name,desc",
            Self::DateAsc => "date,asc",
            Self::DateDesc => "date,desc",
            Self::RelevanceAsc => "relevance,asc",
            Self::RelevanceDesc => "relevance,desc",
            Self::VenueNameAsc => "venueName,asc",
            Self::VenueNameDesc => "venueName,desc",
            Self::OnSaleStartDateAsc => "onSaleStartDate,asc",
            Self::Random => "random",
        }
    }

    /// Human readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NameAsc => "Name ascending",
            Self::NameDesc => "Name descending",
            Self::DateAsc => "Date ascending",
            Self::DateDesc => "Date descending",
            Self::RelevanceAsc => "Relevance ascending",
            Self::RelevanceDesc => "Relevance descending",
            Self::VenueNameAsc => "Venue name ascending",
            Self::VenueNameDesc => "Venue name descending",
            Self::OnSaleStartDateAsc => "On-sale date ascending",
            Self::Random => "Random",
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_query_value())
    }
}

/// Error returned when a string is not a known sort value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort option: {0}")]
pub struct UnknownSortOption(pub String);

impl FromStr for SortOption {
    type Err = UnknownSortOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|option| option.as_query_value() == s)
            .ok_or_else(|| UnknownSortOption(s.to_string()))
    }
}
