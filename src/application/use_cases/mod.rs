//! Use case implementations.

mod event_details;
mod event_feed;

pub use event_details::EventDetails;
pub use event_feed::EventFeed;
