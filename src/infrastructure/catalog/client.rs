//! Catalog API HTTP client with pagination cursor management.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::Url;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, info, warn};

use super::dto::{DetailResponse, EventPageResponse};
use super::request::CatalogEndpoint;
use crate::domain::entities::{CursorState, Detail, FetchPhase, Listing, PageCursor, SortOption};
use crate::domain::errors::FetchError;
use crate::domain::ports::{EventCatalogPort, Transport};

/// Marks a fetch in progress and records its outcome.
///
/// Dropping the guard without [`PhaseGuard::settle`] means the caller
/// abandoned the fetch; the phase then leaves `Fetching` for `Errored`.
struct PhaseGuard<'a> {
    phase: &'a Mutex<FetchPhase>,
    settled: bool,
}

impl PhaseGuard<'_> {
    fn settle<T>(mut self, result: Result<T, FetchError>) -> Result<T, FetchError> {
        let phase = if result.is_ok() {
            FetchPhase::Ready
        } else {
            FetchPhase::Errored
        };
        *self.phase.lock() = phase;
        self.settled = true;

        if let Err(e) = &result {
            warn!(error = %e, "Catalog fetch failed");
        }
        result
    }
}

impl Drop for PhaseGuard<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let mut phase = self.phase.lock();
        if *phase == FetchPhase::Fetching {
            *phase = FetchPhase::Errored;
        }
        debug!("Catalog fetch abandoned before completion");
    }
}

/// Event catalog client.
///
/// The cursor lives behind one async mutex that is held for the whole
/// page exchange, so concurrent page fetches run one after another and
/// each one sees the cursor left by the previous.
pub struct CatalogClient {
    transport: Arc<dyn Transport>,
    endpoint: CatalogEndpoint,
    cursor: AsyncMutex<CursorState>,
    phase: Mutex<FetchPhase>,
}

impl CatalogClient {
    /// Creates a client with an empty cursor.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, endpoint: CatalogEndpoint) -> Self {
        Self {
            transport,
            endpoint,
            cursor: AsyncMutex::new(CursorState::new()),
            phase: Mutex::new(FetchPhase::Idle),
        }
    }

    /// Returns a snapshot of the cursor state.
    #[cfg(test)]
    pub async fn cursor_state(&self) -> CursorState {
        self.cursor.lock().await.clone()
    }

    fn begin(&self) -> PhaseGuard<'_> {
        *self.phase.lock() = FetchPhase::Fetching;
        PhaseGuard {
            phase: &self.phase,
            settled: false,
        }
    }

    async fn execute<T: DeserializeOwned>(&self, url: &Url) -> Result<T, FetchError> {
        debug!(url = %self.endpoint.redacted(url), "Requesting catalog");

        let response = self.transport.request(url.as_str()).await.map_err(|e| {
            warn!(error = %e, "Failed to reach catalog");
            FetchError::from(e)
        })?;

        if !response.is_success() {
            return Err(FetchError::status(response.status));
        }

        serde_json::from_slice(&response.body).map_err(|e| {
            warn!(error = %e, "Failed to parse catalog response");
            FetchError::from(e)
        })
    }

    async fn fetch_page(&self, url: &Url) -> Result<(Vec<Listing>, Option<PageCursor>), FetchError> {
        let page: EventPageResponse = self.execute(url).await?;
        let next = page.next_cursor();
        Ok((page.into_listings(), next))
    }

    async fn load_first_page(
        &self,
        sort: Option<SortOption>,
    ) -> Result<(Vec<Listing>, Option<PageCursor>), FetchError> {
        let url = self.endpoint.first_page_url(sort)?;
        self.fetch_page(&url).await
    }

    async fn load_page_after(
        &self,
        cursor: &PageCursor,
    ) -> Result<(Vec<Listing>, Option<PageCursor>), FetchError> {
        let url = self.endpoint.next_page_url(cursor)?;
        self.fetch_page(&url).await
    }

    async fn load_detail(&self, id: &str) -> Result<Detail, FetchError> {
        let url = self.endpoint.detail_url(id)?;
        let detail: DetailResponse = self.execute(&url).await?;
        Ok(Detail::from(detail))
    }
}

#[async_trait]
impl EventCatalogPort for CatalogClient {
    async fn fetch_first_page(
        &self,
        sort: Option<SortOption>,
    ) -> Result<Vec<Listing>, FetchError> {
        let mut state = self.cursor.lock().await;
        let guard = self.begin();

        let result = self.load_first_page(sort).await.map(|(listings, next)| {
            state.reset();
            state.advance(next);
            info!(
                count = listings.len(),
                has_more = state.can_fetch_more(),
                "Fetched first page"
            );
            listings
        });

        guard.settle(result)
    }

    async fn fetch_next_page(&self) -> Result<Vec<Listing>, FetchError> {
        let mut state = self.cursor.lock().await;
        let guard = self.begin();

        let Some(cursor) = state.cursor().cloned() else {
            debug!("No next page cursor, nothing to fetch");
            state.mark_exhausted();
            return guard.settle(Ok(Vec::new()));
        };

        let result = self.load_page_after(&cursor).await.map(|(listings, next)| {
            state.advance(next);
            debug!(
                count = listings.len(),
                has_more = state.can_fetch_more(),
                "Fetched next page"
            );
            listings
        });

        guard.settle(result)
    }

    async fn fetch_detail(&self, id: &str) -> Result<Detail, FetchError> {
        let guard = self.begin();

        let result = self.load_detail(id).await;

        if result.is_ok() {
            debug!(event_id = %id, "Fetched event detail");
        }
        guard.settle(result)
    }

    async fn can_fetch_more(&self) -> bool {
        self.cursor.lock().await.can_fetch_more()
    }

    fn phase(&self) -> FetchPhase {
        *self.phase.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ApiKey;
    use crate::domain::errors::TransportError;
    use crate::domain::ports::TransportResponse;
    use crate::domain::ports::mocks::{MockTransport, ScriptedTransport};

    const BASE: &str = "https://app.ticketmaster.com";

    const PAGE_WITH_NEXT: &str = r#"{
        "_embedded": {"events": [{
            "name": "John Maus",
            "id": "Z698xZQpZaa4-",
            "images": [
                {"ratio": "16_9", "url": "https://s1.ticketm.net/dam/a/3d6/39c8fddf-4a93-4ffe-bb9e-a6a46d13e3d6_RETINA_PORTRAIT_16_9.jpg", "width": 640, "height": 360, "fallback": false},
                {"ratio": "16_9", "url": "https://s1.ticketm.net/dam/a/3d6/39c8fddf-4a93-4ffe-bb9e-a6a46d13e3d6_RECOMENDATION_16_9.jpg", "width": 100, "height": 56, "fallback": false}
            ],
            "dates": {"start": {"localDate": "2024-10-30", "localTime": "19:00:00"}, "timezone": "Europe/Warsaw"},
            "_embedded": {"venues": [{
                "name": "Niebo",
                "city": {"name": "Warsaw"},
                "country": {"name": "Poland", "countryCode": "PL"},
                "address": {"line1": "ul.  Nowy Świat 21"}
            }]}
        }]},
        "_links": {
            "self": {"href": "/discovery/v2/events.json?size=1&countryCode=PL&page=0"},
            "next": {"href": "/discovery/v2/events.json?countryCode=PL&page=1&size=1"}
        }
    }"#;

    const LAST_PAGE: &str = r#"{
        "_embedded": {"events": [{
            "name": "Last",
            "id": "Z2",
            "images": [],
            "dates": {"start": {"localDate": "2024-11-02"}}
        }]},
        "_links": {"self": {"href": "/discovery/v2/events.json?page=1"}}
    }"#;

    const EMPTY_PAGE: &str = r#"{"_embedded": {"events": []}, "_links": {}}"#;

    const DETAIL: &str = r#"{
        "id": "Z698xZQpZaa4-",
        "name": "John Maus",
        "images": [{"ratio": "3_2", "url": "https://s1.ticketm.net/dam/a/3d6/39c8fddf_ARTIST_PAGE_3_2.jpg", "width": 305, "height": 203}],
        "dates": {"start": {"localDate": "2024-10-30", "localTime": "19:00:00"}},
        "classifications": [
            {"primary": false, "segment": {"id": "KZFzniwnSyZfZ7v7nJ", "name": "Music"}},
            {"primary": true, "segment": {"id": "KZFzniwnSyZfZ7v7nE", "name": "Sports"}}
        ],
        "priceRanges": [{"type": "standard", "currency": "PLN", "min": 139.0, "max": 139.0}],
        "seatmap": {"staticUrl": "https://media.ticketmaster.eu/poland/ebf66dfe94f8ac241fad371df1d54ec6.jpg", "id": "seatmap"},
        "_embedded": {
            "venues": [{"name": "Niebo", "city": {"name": "Warsaw"}, "country": {"name": "Poland"}}],
            "attractions": [{"name": "John Maus"}, {"name": "Winiary Bookings"}]
        }
    }"#;

    fn client(transport: Arc<dyn Transport>) -> CatalogClient {
        let key = ApiKey::new("test-key").unwrap();
        CatalogClient::new(transport, CatalogEndpoint::new(BASE, key).unwrap())
    }

    #[tokio::test]
    async fn test_first_page_request_and_decode() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_json(PAGE_WITH_NEXT);
        let client = client(transport.clone());

        let listings = client.fetch_first_page(None).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        let without_key = requests[0].split("&apikey").next().unwrap();
        assert_eq!(
            without_key,
            "https://app.ticketmaster.com/discovery/v2/events.json?countryCode=PL"
        );
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].id, "Z698xZQpZaa4-");
        assert_eq!(listings[0].start.local_date, "2024-10-30");
        assert_eq!(
            listings[0].venues[0].address.as_deref(),
            Some("ul.  Nowy Świat 21")
        );
        assert!(client.can_fetch_more().await);
        assert_eq!(client.phase(), FetchPhase::Ready);
    }

    #[tokio::test]
    async fn test_server_error_is_status_failure() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_response(500, Vec::new());
        let client = client(transport);

        let error = client.fetch_first_page(None).await.unwrap_err();

        assert_eq!(error, FetchError::status(500));
        assert_eq!(error.to_string(), "500");
        assert_eq!(client.phase(), FetchPhase::Errored);
    }

    #[tokio::test]
    async fn test_empty_page_is_not_an_error() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_json(EMPTY_PAGE);
        let client = client(transport);

        let listings = client.fetch_first_page(None).await.unwrap();

        assert!(listings.is_empty());
        assert!(!client.can_fetch_more().await);
        assert!(client.cursor_state().await.is_exhausted());
    }

    #[tokio::test]
    async fn test_next_page_without_cursor_returns_empty() {
        let transport = Arc::new(ScriptedTransport::new());
        let client = client(transport.clone());

        let listings = client.fetch_next_page().await.unwrap();

        assert!(listings.is_empty());
        assert!(transport.requests().is_empty());
        assert!(client.cursor_state().await.is_exhausted());
        assert_eq!(client.phase(), FetchPhase::Ready);
    }

    #[tokio::test]
    async fn test_pages_advance_until_exhausted() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_json(PAGE_WITH_NEXT).push_json(LAST_PAGE);
        let client = client(transport.clone());

        client.fetch_first_page(None).await.unwrap();
        let first_cursor = client.cursor_state().await.cursor().cloned();
        let listings = client.fetch_next_page().await.unwrap();

        assert_eq!(listings[0].id, "Z2");
        assert!(!client.can_fetch_more().await);
        assert_ne!(client.cursor_state().await.cursor().cloned(), first_cursor);

        let requests = transport.requests();
        assert!(requests[1].starts_with("https://app.ticketmaster.com/discovery/v2/events.json?"));
        assert!(requests[1].contains("page=1"));
        assert!(requests[1].ends_with("apikey=test-key"));

        let after = client.fetch_next_page().await.unwrap();
        assert!(after.is_empty());
        assert!(!client.can_fetch_more().await);
        assert_eq!(transport.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_first_page_resets_exhausted() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_json(EMPTY_PAGE).push_json(PAGE_WITH_NEXT);
        let client = client(transport);

        client.fetch_first_page(None).await.unwrap();
        assert!(client.cursor_state().await.is_exhausted());

        client.fetch_first_page(Some(SortOption::NameAsc)).await.unwrap();
        let state = client.cursor_state().await;
        assert!(!state.is_exhausted());
        assert!(state.can_fetch_more());
    }

    #[tokio::test]
    async fn test_failure_leaves_cursor_untouched() {
        let transport = Arc::new(ScriptedTransport::new());
        transport
            .push_json(PAGE_WITH_NEXT)
            .push_error(TransportError::Timeout)
            .push_response(200, "not json");
        let client = client(transport);

        client.fetch_first_page(None).await.unwrap();
        let before = client.cursor_state().await;

        let error = client.fetch_next_page().await.unwrap_err();
        assert!(matches!(error, FetchError::Network { .. }));
        assert_eq!(client.cursor_state().await, before);
        assert_eq!(client.phase(), FetchPhase::Errored);

        let error = client.fetch_next_page().await.unwrap_err();
        assert!(matches!(error, FetchError::Unclassified { .. }));
        assert_eq!(client.cursor_state().await, before);
    }

    #[tokio::test]
    async fn test_random_sort_cursor_is_rewritten() {
        let page = r#"{"_embedded": {"events": []},
            "_links": {"next": {"href": "/discovery/v2/events.json?sort=random,asc&page=1"}}}"#;
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_json(page).push_json(EMPTY_PAGE);
        let client = client(transport.clone());

        client.fetch_first_page(Some(SortOption::Random)).await.unwrap();
        client.fetch_next_page().await.unwrap();

        let next = &transport.requests()[1];
        assert!(next.contains("sort=random&"));
        assert!(!next.contains("asc"));
    }

    #[tokio::test]
    async fn test_concurrent_next_pages_do_not_reuse_cursor() {
        let second = r#"{"_embedded": {"events": []},
            "_links": {"next": {"href": "/discovery/v2/events.json?page=2"}}}"#;
        let transport = Arc::new(ScriptedTransport::new());
        transport
            .push_json(PAGE_WITH_NEXT)
            .push_json(second)
            .push_json(LAST_PAGE);
        let client = Arc::new(client(transport.clone()));

        client.fetch_first_page(None).await.unwrap();

        let (a, b) = tokio::join!(
            {
                let client = client.clone();
                async move { client.fetch_next_page().await }
            },
            {
                let client = client.clone();
                async move { client.fetch_next_page().await }
            }
        );
        assert!(a.is_ok());
        assert!(b.is_ok());

        let requests = transport.requests();
        assert_eq!(requests.len(), 3);
        assert!(requests[1].contains("page=1"));
        assert!(requests[2].contains("page=2"));
        assert!(!client.can_fetch_more().await);
    }

    struct StalledTransport;

    #[async_trait]
    impl Transport for StalledTransport {
        async fn request(&self, _url: &str) -> Result<TransportResponse, TransportError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_abandoned_fetch_settles_as_errored() {
        let client = client(Arc::new(StalledTransport));

        let outcome = tokio::time::timeout(
            std::time::Duration::from_millis(20),
            client.fetch_first_page(None),
        )
        .await;

        assert!(outcome.is_err());
        assert_eq!(client.phase(), FetchPhase::Errored);
        assert_eq!(client.cursor_state().await, CursorState::new());
    }

    #[tokio::test]
    async fn test_abandoned_detail_fetch_does_not_stay_fetching() {
        let client = client(Arc::new(StalledTransport));

        let outcome = tokio::time::timeout(
            std::time::Duration::from_millis(20),
            client.fetch_detail("Z698xZQpZaa4-"),
        )
        .await;

        assert!(outcome.is_err());
        assert_ne!(client.phase(), FetchPhase::Fetching);
    }

    #[tokio::test]
    async fn test_fetch_detail() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_json(DETAIL);
        let client = client(transport.clone());

        let detail = client.fetch_detail("Z698xZQpZaa4-").await.unwrap();

        assert_eq!(
            transport.requests()[0],
            "https://app.ticketmaster.com/discovery/v2/events/Z698xZQpZaa4-.json?apikey=test-key"
        );
        assert_eq!(detail.name, "John Maus");
        assert_eq!(detail.attractions.len(), 2);
        assert_eq!(detail.min_price().map(|p| p.currency.as_str()), Some("PLN"));
        assert_eq!(
            detail
                .primary_classification()
                .map(|c| c.segment.name.as_str()),
            Some("Music")
        );
        assert_eq!(
            detail.seat_map_url(),
            Some("https://media.ticketmaster.eu/poland/ebf66dfe94f8ac241fad371df1d54ec6.jpg")
        );
        assert!(!client.can_fetch_more().await);
    }

    #[tokio::test]
    async fn test_detail_with_invalid_id_makes_no_request() {
        let mut transport = MockTransport::new();
        transport.expect_request().times(0);
        let client = client(Arc::new(transport));

        let error = client.fetch_detail("").await.unwrap_err();
        assert!(matches!(error, FetchError::InvalidRequest { .. }));
    }

    #[tokio::test]
    async fn test_detail_not_found() {
        let mut transport = MockTransport::new();
        transport
            .expect_request()
            .times(1)
            .returning(|_| Ok(TransportResponse::new(404, "{}")));
        let client = client(Arc::new(transport));

        let error = client.fetch_detail("missing").await.unwrap_err();
        assert_eq!(error.status_code(), Some(404));
    }
}
