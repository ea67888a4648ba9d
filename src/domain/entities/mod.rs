//! Domain entity definitions.

mod api_key;
mod cursor;
mod detail;
mod event;
mod image_variant;
mod sort_option;

pub use api_key::ApiKey;
pub use cursor::{CursorState, FetchPhase, PageCursor};
pub use detail::{Classification, Detail, PriceRange, SeatMap, Segment};
pub use event::{EventStart, Listing, Venue};
pub use image_variant::{ImageVariant, RECOMMENDATION_MARKER, RETINA_MARKER};
pub use sort_option::{SortOption, UnknownSortOption};
