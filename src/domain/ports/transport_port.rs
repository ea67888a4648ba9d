//! Transport port for single request/response exchanges.

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::errors::TransportError;

/// Raw response of a transport exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: Bytes,
}

impl TransportResponse {
    /// Creates a response.
    #[must_use]
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns true for 2xx statuses.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Port performing one GET exchange for a URL.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetches `url`. Non-2xx statuses are returned, not raised.
    async fn request(&self, url: &str) -> Result<TransportResponse, TransportError>;
}
