//! Paginated event feed.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::entities::{Listing, SortOption};
use crate::domain::errors::FetchError;
use crate::domain::ports::EventCatalogPort;

/// Accumulates listings across pages.
pub struct EventFeed {
    catalog: Arc<dyn EventCatalogPort>,
    listings: Vec<Listing>,
    last_error: Option<FetchError>,
}

impl EventFeed {
    /// Creates an empty feed.
    #[must_use]
    pub fn new(catalog: Arc<dyn EventCatalogPort>) -> Self {
        Self {
            catalog,
            listings: Vec::new(),
            last_error: None,
        }
    }

    /// Listings loaded so far, in page order.
    #[must_use]
    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    /// Error of the most recent load, cleared by the next successful one.
    #[must_use]
    pub const fn last_error(&self) -> Option<&FetchError> {
        self.last_error.as_ref()
    }

    /// Discards loaded listings and loads the first page.
    ///
    /// # Errors
    /// Returns error if the first page cannot be fetched.
    pub async fn refresh(&mut self, sort: Option<SortOption>) -> Result<usize, FetchError> {
        debug!(sort = ?sort, "Refreshing event feed");
        self.listings.clear();
        self.last_error = None;

        let page = self.catalog.fetch_first_page(sort).await;
        self.absorb(page)
    }

    /// Appends the next page. Does nothing once the catalog has no more pages.
    ///
    /// # Errors
    /// Returns error if the page cannot be fetched; loaded listings are kept.
    pub async fn load_more(&mut self) -> Result<usize, FetchError> {
        if !self.can_load_more().await {
            debug!("No more pages to load");
            return Ok(0);
        }

        let page = self.catalog.fetch_next_page().await;
        self.absorb(page)
    }

    /// Returns true while the catalog holds a next-page cursor.
    pub async fn can_load_more(&self) -> bool {
        self.catalog.can_fetch_more().await
    }

    fn absorb(&mut self, page: Result<Vec<Listing>, FetchError>) -> Result<usize, FetchError> {
        match page {
            Ok(listings) => {
                let count = listings.len();
                self.listings.extend(listings);
                self.last_error = None;
                info!(count, total = self.listings.len(), "Loaded events");
                Ok(count)
            }
            Err(e) => {
                warn!(error = %e, "Failed to load events");
                self.last_error = Some(e.clone());
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::EventStart;
    use crate::domain::ports::mocks::MockEventCatalog;

    fn listing(id: &str) -> Listing {
        Listing {
            id: id.to_string(),
            name: format!("Event {id}"),
            images: Vec::new(),
            start: EventStart::new("2024-11-17"),
            venues: Vec::new(),
        }
    }

    fn ids(feed: &EventFeed) -> Vec<&str> {
        feed.listings().iter().map(|l| l.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_refresh_then_load_more_appends() {
        let catalog = Arc::new(
            MockEventCatalog::new(Ok(vec![listing("a"), listing("b")]))
                .with_next_page(Ok(vec![listing("c")])),
        );
        let mut feed = EventFeed::new(catalog.clone());

        assert_eq!(feed.refresh(Some(SortOption::DateAsc)).await.unwrap(), 2);
        assert!(feed.can_load_more().await);
        assert_eq!(feed.load_more().await.unwrap(), 1);

        assert_eq!(ids(&feed), vec!["a", "b", "c"]);
        assert!(!feed.can_load_more().await);
        assert_eq!(catalog.requested_sorts(), vec![Some(SortOption::DateAsc)]);
    }

    #[tokio::test]
    async fn test_load_more_without_cursor_is_noop() {
        let catalog = Arc::new(MockEventCatalog::new(Ok(vec![listing("a")])));
        let mut feed = EventFeed::new(catalog);

        feed.refresh(None).await.unwrap();
        assert_eq!(feed.load_more().await.unwrap(), 0);
        assert_eq!(ids(&feed), vec!["a"]);
    }

    #[tokio::test]
    async fn test_refresh_replaces_listings() {
        let catalog = Arc::new(MockEventCatalog::new(Ok(vec![listing("a")])));
        let mut feed = EventFeed::new(catalog);

        feed.refresh(None).await.unwrap();
        feed.refresh(None).await.unwrap();

        assert_eq!(ids(&feed), vec!["a"]);
    }

    #[tokio::test]
    async fn test_failed_page_keeps_loaded_listings() {
        let catalog = Arc::new(
            MockEventCatalog::new(Ok(vec![listing("a")]))
                .with_next_page(Err(FetchError::status(500))),
        );
        let mut feed = EventFeed::new(catalog);

        feed.refresh(None).await.unwrap();
        let error = feed.load_more().await.unwrap_err();

        assert_eq!(error.to_string(), "500");
        assert_eq!(feed.last_error(), Some(&FetchError::status(500)));
        assert_eq!(ids(&feed), vec!["a"]);
    }

    #[tokio::test]
    async fn test_failed_refresh_clears_listings() {
        let catalog = Arc::new(MockEventCatalog::new(Err(FetchError::network("offline"))));
        let mut feed = EventFeed::new(catalog);

        assert!(feed.refresh(None).await.is_err());
        assert!(feed.listings().is_empty());
        assert!(feed.last_error().is_some_and(FetchError::is_retryable));
    }
}
