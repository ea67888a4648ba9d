//! Catalog API key value object.

use std::fmt;

/// API credential appended to every catalog request.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey {
    value: String,
}

impl ApiKey {
    /// Creates a key, rejecting blank input.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into().trim().to_string();

        if value.is_empty() || value.chars().any(char::is_whitespace) {
            return None;
        }

        Some(Self { value })
    }

    /// Returns key as string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Returns masked key for display.
    #[must_use]
    pub fn masked(&self) -> String {
        let chars: Vec<char> = self.value.chars().collect();
        if chars.len() <= 8 {
            return "*".repeat(chars.len());
        }

        let visible_prefix: String = chars[..2].iter().collect();
        let visible_suffix: String = chars[chars.len() - 2..].iter().collect();
        format!("{visible_prefix}...{visible_suffix}")
    }

    /// Replaces every occurrence of the key in `text` with its masked form.
    #[must_use]
    pub fn redact(&self, text: &str) -> String {
        text.replace(&self.value, &self.masked())
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKey")
            .field("value", &self.masked())
            .finish()
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.masked())
    }
}
