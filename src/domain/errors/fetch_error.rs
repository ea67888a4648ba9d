//! Catalog fetch error types.

use thiserror::Error;

/// Failure of a single catalog fetch, classified into exactly one kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum FetchError {
    #[error("could not build request: {reason}")]
    InvalidRequest { reason: String },

    #[error("{status}")]
    ResponseStatus { status: u16 },

    #[error("network error: {message}")]
    Network { message: String },

    #[error("unexpected error: {message}")]
    Unclassified { message: String },
}

impl FetchError {
    /// Creates invalid request error.
    #[must_use]
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self::InvalidRequest {
            reason: reason.into(),
        }
    }

    /// Creates response status error.
    #[must_use]
    pub const fn status(status: u16) -> Self {
        Self::ResponseStatus { status }
    }

    /// Creates network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates unclassified error.
    #[must_use]
    pub fn unclassified(message: impl Into<String>) -> Self {
        Self::Unclassified {
            message: message.into(),
        }
    }

    /// Returns the HTTP status carried by a response status failure.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::ResponseStatus { status } => Some(*status),
            _ => None,
        }
    }

    /// Returns whether a manual retry may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Network { .. })
    }

    /// Returns a description suitable for showing to a user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidRequest { .. } => {
                "There was a problem building the request. Please contact the developer.".to_string()
            }
            Self::ResponseStatus { status } => {
                format!("The server could not handle the request.\n{status}")
            }
            Self::Network { message } => {
                format!("There was a problem with the network connection.\n{message}")
            }
            Self::Unclassified { .. } => "Something went wrong.".to_string(),
        }
    }
}

impl From<TransportError> for FetchError {
    fn from(error: TransportError) -> Self {
        Self::network(error.to_string())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(error: serde_json::Error) -> Self {
        Self::unclassified(format!("failed to decode response: {error}"))
    }
}

/// Failure of the underlying HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request timed out.
    #[error("request timed out")]
    Timeout,
    /// The connection could not be established.
    #[error("failed to connect: {0}")]
    Connect(String),
    /// Any other transport-level failure.
    #[error("{0}")]
    Other(String),
}
