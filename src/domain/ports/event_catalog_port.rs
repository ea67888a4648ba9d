//! Event catalog port: paginated listings and per-event details.

use async_trait::async_trait;

use crate::domain::entities::{Detail, FetchPhase, Listing, SortOption};
use crate::domain::errors::FetchError;

/// Port for fetching events from the remote catalog.
///
/// Implementations own the pagination cursor and must serialize every
/// cursor update.
#[async_trait]
pub trait EventCatalogPort: Send + Sync {
    /// Fetches page zero, replacing any stored cursor.
    async fn fetch_first_page(&self, sort: Option<SortOption>)
    -> Result<Vec<Listing>, FetchError>;

    /// Fetches the page behind the stored cursor.
    /// Returns an empty page when there is no cursor.
    async fn fetch_next_page(&self) -> Result<Vec<Listing>, FetchError>;

    /// Fetches the detail record of one event.
    async fn fetch_detail(&self, id: &str) -> Result<Detail, FetchError>;

    /// Returns true iff a next-page cursor is stored.
    async fn can_fetch_more(&self) -> bool;

    /// Returns the phase of the most recent fetch.
    fn phase(&self) -> FetchPhase;
}
