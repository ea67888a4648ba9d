//! Data transfer objects for the application layer.

mod event_dto;

pub use event_dto::{EventDetailsView, InfoField, ListingSummary};
