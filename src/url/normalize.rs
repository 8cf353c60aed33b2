use crate::UrlError;
use std::fmt;
use url::Url;

/// Query parameters that never distinguish one page from another
///
/// Session identifiers, analytics tags, pagination/sorting/view hints and
/// calendar or locale selectors. Matched case-insensitively.
const IGNORED_PARAMS: &[&str] = &[
    // sessions
    "sid",
    "sessid",
    "sessionid",
    "session_id",
    "phpsessid",
    "jsessionid",
    // tracking
    "fbclid",
    "gclid",
    "yclid",
    "mc_cid",
    "mc_eid",
    "_ga",
    "ref",
    "source",
    // pagination, sorting, view, format
    "page",
    "paged",
    "per_page",
    "limit",
    "offset",
    "sort",
    "sortby",
    "order",
    "orderby",
    "view",
    "display",
    "format",
    "print",
    // calendar and locale
    "date",
    "day",
    "week",
    "month",
    "year",
    "tribe-bar-date",
    "eventdisplay",
    "ical",
    "outlook-ical",
    "lang",
    "language",
    "locale",
];

/// Prefixes of query parameters that are always dropped
const IGNORED_PARAM_PREFIXES: &[&str] = &["utm_", "tribe_", "_hs"];

/// Canonical form of a URL used as the deduplication key
///
/// Two URLs that differ only in fragment, ignored query parameters or
/// query-parameter order share the same `NormalizedUrl`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedUrl(String);

impl NormalizedUrl {
    /// Returns the canonical URL string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the key, returning the canonical URL string
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for NormalizedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Parses a URL string, mapping failures to [`UrlError::Parse`]
pub fn parse_url(url_str: &str) -> Result<Url, UrlError> {
    Url::parse(url_str.trim()).map_err(|e| UrlError::Parse {
        url: url_str.to_string(),
        reason: e.to_string(),
    })
}

/// Normalizes a URL string into its deduplication key
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed or host-less
/// 2. Lowercase the host (done by the parser) and drop any credentials
/// 3. Remove the fragment
/// 4. Remove ignored query parameters (sessions, tracking, pagination,
///    sorting, view/format, calendar and locale selectors)
/// 5. Re-encode the remaining parameters sorted by key, then value
/// 6. Remove an empty query string
///
/// The result is a fixed point: normalizing it again yields the same key.
///
/// # Examples
///
/// ```
/// use page_sieve::url::normalize_url;
///
/// let key = normalize_url("https://WWW.ICS.UCI.EDU/about?b=2&utm_source=x&a=1#top").unwrap();
/// assert_eq!(key.as_str(), "https://www.ics.uci.edu/about?a=1&b=2");
/// ```
pub fn normalize_url(url_str: &str) -> Result<NormalizedUrl, UrlError> {
    normalize_parsed(parse_url(url_str)?)
}

/// Normalizes an already-parsed URL
pub fn normalize_parsed(mut url: Url) -> Result<NormalizedUrl, UrlError> {
    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingHost(url.to_string()));
    }

    // Credentials never identify a page; failures only occur for
    // cannot-be-a-base URLs, which have no host and were rejected above.
    let _ = url.set_username("");
    let _ = url.set_password(None);

    url.set_fragment(None);

    if url.query().is_some() {
        let params = filter_and_sort_query_params(&url);
        if params.is_empty() {
            url.set_query(None);
        } else {
            url.query_pairs_mut().clear().extend_pairs(params);
        }
    }

    Ok(NormalizedUrl(url.into()))
}

/// Filters out ignored parameters and sorts the rest by key, then value
fn filter_and_sort_query_params(url: &Url) -> Vec<(String, String)> {
    let mut params: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| !is_ignored_param(key))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    params.sort();
    params
}

/// Checks if a query parameter is in the ignored set
pub fn is_ignored_param(key: &str) -> bool {
    let key = key.to_ascii_lowercase();

    IGNORED_PARAMS.contains(&key.as_str())
        || IGNORED_PARAM_PREFIXES
            .iter()
            .any(|prefix| key.starts_with(prefix))
}
