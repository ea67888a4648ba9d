//! Catalog request URL construction.

use std::sync::OnceLock;

use regex::Regex;
use reqwest::Url;

use crate::domain::entities::{ApiKey, PageCursor, SortOption};
use crate::domain::errors::FetchError;

const EVENTS_PATH: &str = "/discovery/v2/events.json";
const EVENT_DETAIL_PATH: &str = "/discovery/v2/events";
const API_KEY_PARAM: &str = "apikey";

/// Builds the URLs of every catalog request.
#[derive(Debug, Clone)]
pub struct CatalogEndpoint {
    base_url: Url,
    api_key: ApiKey,
    country_code: String,
    page_size: Option<u32>,
    locale: Option<String>,
}

impl CatalogEndpoint {
    /// Creates an endpoint for `base_url` filtered to Poland.
    ///
    /// # Errors
    /// Returns `InvalidRequest` if the base URL does not parse.
    pub fn new(base_url: &str, api_key: ApiKey) -> Result<Self, FetchError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| FetchError::invalid_request(format!("invalid base URL {base_url}: {e}")))?;

        if base_url.cannot_be_a_base() {
            return Err(FetchError::invalid_request(format!(
                "base URL {base_url} cannot be a base"
            )));
        }

        Ok(Self {
            base_url,
            api_key,
            country_code: "PL".to_string(),
            page_size: None,
            locale: None,
        })
    }

    /// Sets the country filter.
    #[must_use]
    pub fn with_country_code(mut self, country_code: impl Into<String>) -> Self {
        self.country_code = country_code.into();
        self
    }

    /// Sets the page size.
    #[must_use]
    pub const fn with_page_size(mut self, page_size: Option<u32>) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets the response locale.
    #[must_use]
    pub fn with_locale(mut self, locale: Option<String>) -> Self {
        self.locale = locale;
        self
    }

    /// Returns the API key.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Returns `url` as text with the API key masked, for logging.
    #[must_use]
    pub fn redacted(&self, url: &Url) -> String {
        self.api_key.redact(url.as_str())
    }

    /// URL of page zero.
    ///
    /// # Errors
    /// Returns `InvalidRequest` if the URL cannot be assembled.
    pub fn first_page_url(&self, sort: Option<SortOption>) -> Result<Url, FetchError> {
        let mut url = self.join(EVENTS_PATH)?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("countryCode", &self.country_code);
            if let Some(sort) = sort {
                query.append_pair("sort", sort.as_query_value());
            }
            if let Some(size) = self.page_size {
                query.append_pair("size", &size.to_string());
            }
            if let Some(locale) = &self.locale {
                query.append_pair("locale", locale);
            }
            query.append_pair(API_KEY_PARAM, self.api_key.as_str());
        }
        Ok(url)
    }

    /// URL of the page behind `cursor`.
    ///
    /// The reference is resolved against the base URL, any credential in it
    /// is replaced by ours, and a directional suffix on the random sort is
    /// stripped.
    ///
    /// # Errors
    /// Returns `InvalidRequest` if the reference cannot be resolved.
    pub fn next_page_url(&self, cursor: &PageCursor) -> Result<Url, FetchError> {
        let href = strip_random_sort_suffix(cursor.as_str());
        let mut url = self
            .base_url
            .join(&href)
            .map_err(|e| FetchError::invalid_request(format!("malformed cursor {cursor}: {e}")))?;

        if url.host_str() != self.base_url.host_str() || url.scheme() != self.base_url.scheme() {
            return Err(FetchError::invalid_request(format!(
                "cursor {cursor} points outside the catalog host"
            )));
        }

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(key, _)| key != API_KEY_PARAM)
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        url.query_pairs_mut()
            .clear()
            .extend_pairs(pairs)
            .append_pair(API_KEY_PARAM, self.api_key.as_str());

        Ok(url)
    }

    /// URL of one event's detail record.
    ///
    /// # Errors
    /// Returns `InvalidRequest` for an empty id or one that would change the path.
    pub fn detail_url(&self, id: &str) -> Result<Url, FetchError> {
        if id.is_empty() || id.contains(['/', '?', '#', '%']) || id.chars().any(char::is_whitespace)
        {
            return Err(FetchError::invalid_request(format!("invalid event id {id:?}")));
        }

        let mut url = self.join(&format!("{EVENT_DETAIL_PATH}/{id}.json"))?;
        url.query_pairs_mut()
            .append_pair(API_KEY_PARAM, self.api_key.as_str());
        Ok(url)
    }

    fn join(&self, path: &str) -> Result<Url, FetchError> {
        self.base_url
            .join(path)
            .map_err(|e| FetchError::invalid_request(format!("invalid path {path}: {e}")))
    }
}

/// The catalog hands back `sort=random,asc` in next links but rejects it.
fn strip_random_sort_suffix(href: &str) -> String {
    static RANDOM_SORT_SUFFIX: OnceLock<Regex> = OnceLock::new();
    let re = RANDOM_SORT_SUFFIX.get_or_init(|| {
        Regex::new(r"(?i)(sort=random)(?:,|%2C)(?:asc|desc)").expect("Invalid regex")
    });
    re.replace_all(href, "$1").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    const BASE: &str = "https://app.ticketmaster.com";

    fn endpoint() -> CatalogEndpoint {
        CatalogEndpoint::new(BASE, ApiKey::new("secret-key").unwrap()).unwrap()
    }

    fn query_value(url: &Url, key: &str) -> Option<String> {
        url.query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    #[test]
    fn test_first_page_url() {
        let url = endpoint().first_page_url(None).unwrap();
        assert_eq!(
            url.as_str(),
            "https://app.ticketmaster.com/discovery/v2/events.json?countryCode=PL&apikey=secret-key"
        );
    }

    #[test]
    fn test_first_page_url_with_options() {
        let url = endpoint()
            .with_country_code("DE")
            .with_page_size(Some(20))
            .with_locale(Some("en-us".to_string()))
            .first_page_url(Some(SortOption::DateDesc))
            .unwrap();

        assert_eq!(query_value(&url, "countryCode").as_deref(), Some("DE"));
        assert_eq!(query_value(&url, "sort").as_deref(), Some("date,desc"));
        assert_eq!(query_value(&url, "size").as_deref(), Some("20"));
        assert_eq!(query_value(&url, "locale").as_deref(), Some("en-us"));
        assert_eq!(query_value(&url, "apikey").as_deref(), Some("secret-key"));
    }

    #[test]
    fn test_next_page_url_resolves_and_appends_key() {
        let cursor = PageCursor::new("/discovery/v2/events.json?countryCode=PL&page=6&size=1").unwrap();
        let url = endpoint().next_page_url(&cursor).unwrap();

        assert_eq!(url.host_str(), Some("app.ticketmaster.com"));
        assert_eq!(url.path(), "/discovery/v2/events.json");
        assert_eq!(query_value(&url, "page").as_deref(), Some("6"));
        assert_eq!(query_value(&url, "apikey").as_deref(), Some("secret-key"));
    }

    #[test]
    fn test_next_page_url_replaces_foreign_key() {
        let cursor = PageCursor::new("/discovery/v2/events.json?page=2&apikey=other").unwrap();
        let url = endpoint().next_page_url(&cursor).unwrap();

        let keys: Vec<String> = url
            .query_pairs()
            .filter(|(k, _)| k == "apikey")
            .map(|(_, v)| v.into_owned())
            .collect();
        assert_eq!(keys, vec!["secret-key".to_string()]);
    }

    #[test_case("/discovery/v2/events.json?sort=random,asc&page=1" ; "comma_asc")]
    #[test_case("/discovery/v2/events.json?sort=random,desc&page=1" ; "comma_desc")]
    #[test_case("/discovery/v2/events.json?sort=random%2Casc&page=1" ; "encoded_comma")]
    #[test_case("/discovery/v2/events.json?sort=random&page=1" ; "already_plain")]
    fn test_random_sort_suffix_stripped(href: &str) {
        let cursor = PageCursor::new(href).unwrap();
        let url = endpoint().next_page_url(&cursor).unwrap();

        assert_eq!(query_value(&url, "sort").as_deref(), Some("random"));
        assert_eq!(query_value(&url, "page").as_deref(), Some("1"));
    }

    #[test]
    fn test_other_sorts_untouched() {
        let cursor = PageCursor::new("/discovery/v2/events.json?sort=name,asc&page=1").unwrap();
        let url = endpoint().next_page_url(&cursor).unwrap();
        assert_eq!(query_value(&url, "sort").as_deref(), Some("name,asc"));
    }

    #[test]
    fn test_cursor_to_other_host_rejected() {
        let cursor = PageCursor::new("https://evil.example.com/discovery/v2/events.json").unwrap();
        let result = endpoint().next_page_url(&cursor);
        assert!(matches!(result, Err(FetchError::InvalidRequest { .. })));
    }

    #[test]
    fn test_detail_url() {
        let url = endpoint().detail_url("Z698xZQpZaa4-").unwrap();
        assert_eq!(
            url.as_str(),
            "https://app.ticketmaster.com/discovery/v2/events/Z698xZQpZaa4-.json?apikey=secret-key"
        );
    }

    #[test_case("" ; "empty")]
    #[test_case("a/b" ; "slash")]
    #[test_case("a?b" ; "query")]
    #[test_case("a b" ; "space")]
    fn test_detail_url_rejects_bad_ids(id: &str) {
        assert!(matches!(
            endpoint().detail_url(id),
            Err(FetchError::InvalidRequest { .. })
        ));
    }

    #[test]
    fn test_invalid_base_url() {
        let result = CatalogEndpoint::new("not a url", ApiKey::new("k").unwrap());
        assert!(matches!(result, Err(FetchError::InvalidRequest { .. })));
    }

    #[test]
    fn test_redacted() {
        let endpoint = endpoint();
        let url = endpoint.first_page_url(None).unwrap();
        assert!(!endpoint.redacted(&url).contains("secret-key"));
    }
}
