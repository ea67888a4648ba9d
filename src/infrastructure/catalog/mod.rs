//! Event catalog API client.

mod client;
mod dto;
mod request;

pub use client::CatalogClient;
pub use request::CatalogEndpoint;
