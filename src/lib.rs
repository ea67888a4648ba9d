//! Event catalog - a paginated client for the public event discovery API.
//!
//! This crate fetches event listings page by page through a single-writer
//! cursor, picks the images worth showing from each event's variants, and
//! keeps decoded images in a bounded in-memory cache.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing use cases and DTOs.
pub mod application;
/// Domain layer containing entities, errors, ports and pure services.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "event-catalog";
