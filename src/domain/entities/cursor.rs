//! Pagination cursor state.

use std::fmt;

/// Opaque reference to the next page, as returned in `_links.next.href`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageCursor(String);

impl PageCursor {
    /// Wraps a next-page reference. Blank references yield `None`.
    #[must_use]
    pub fn new(href: impl Into<String>) -> Option<Self> {
        let href = href.into();
        if href.trim().is_empty() {
            None
        } else {
            Some(Self(href))
        }
    }

    /// Returns the raw reference.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle of a catalog client. There is no terminal phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchPhase {
    /// No fetch has been issued yet.
    #[default]
    Idle,
    /// A fetch is in flight.
    Fetching,
    /// The last fetch succeeded.
    Ready,
    /// The last fetch failed; the cursor was left untouched.
    Errored,
}

/// Next-page cursor plus the exhausted flag.
///
/// Once `exhausted` is set it stays set until [`CursorState::reset`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CursorState {
    cursor: Option<PageCursor>,
    exhausted: bool,
}

impl CursorState {
    /// Creates an empty, non-exhausted state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored cursor.
    #[must_use]
    pub const fn cursor(&self) -> Option<&PageCursor> {
        self.cursor.as_ref()
    }

    /// Returns true once a page without a next link has been seen.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Returns true iff a cursor is stored.
    #[must_use]
    pub const fn can_fetch_more(&self) -> bool {
        self.cursor.is_some()
    }

    /// Clears the cursor and the exhausted flag for a fresh start.
    pub fn reset(&mut self) {
        self.cursor = None;
        self.exhausted = false;
    }

    /// Records the next link of a successful page.
    pub fn advance(&mut self, next: Option<PageCursor>) {
        if next.is_none() {
            self.exhausted = true;
        }
        self.cursor = next;
    }

    /// Marks the state exhausted without a request.
    pub fn mark_exhausted(&mut self) {
        self.cursor = None;
        self.exhausted = true;
    }
}
