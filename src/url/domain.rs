use url::Url;

/// Extracts the lowercase host from a URL
///
/// # Examples
///
/// ```
/// use url::Url;
/// use page_sieve::url::extract_domain;
///
/// let url = Url::parse("https://WICS.ics.uci.edu/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("wics.ics.uci.edu".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Returns the leftmost DNS label of a host, used to group pages by site section
///
/// ```
/// use page_sieve::url::subdomain_label;
///
/// assert_eq!(subdomain_label("wics.ics.uci.edu"), "wics");
/// assert_eq!(subdomain_label("localhost"), "localhost");
/// ```
pub fn subdomain_label(host: &str) -> &str {
    host.split('.').next().unwrap_or(host)
}
