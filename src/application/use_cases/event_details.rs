//! Event detail use case.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::dto::EventDetailsView;
use crate::domain::errors::FetchError;
use crate::domain::ports::EventCatalogPort;

/// Loads one event and prepares it for display.
#[derive(Clone)]
pub struct EventDetails {
    catalog: Arc<dyn EventCatalogPort>,
}

impl EventDetails {
    /// Creates the use case.
    #[must_use]
    pub const fn new(catalog: Arc<dyn EventCatalogPort>) -> Self {
        Self { catalog }
    }

    /// Fetches the event `id`.
    ///
    /// # Errors
    /// Returns error if the id is unusable or the fetch fails.
    pub async fn load(&self, id: &str) -> Result<EventDetailsView, FetchError> {
        debug!(id, "Loading event details");

        let detail = self.catalog.fetch_detail(id).await.map_err(|e| {
            warn!(id, error = %e, "Failed to load event details");
            e
        })?;

        let view = EventDetailsView::from(&detail);
        debug!(
            id,
            images = view.image_urls.len(),
            fields = view.fields.len(),
            "Event details ready"
        );
        Ok(view)
    }
}
