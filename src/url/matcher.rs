use crate::config::ScopeConfig;
use url::Url;

/// Checks if a domain matches a wildcard pattern
///
/// 1. Exact match: "ics.uci.edu" matches only "ics.uci.edu"
/// 2. Wildcard match: "*.ics.uci.edu" matches "ics.uci.edu" itself and any
///    subdomain such as "wics.ics.uci.edu" or "a.b.ics.uci.edu"
///
/// # Examples
///
/// ```
/// use page_sieve::url::matches_wildcard;
///
/// assert!(matches_wildcard("*.ics.uci.edu", "ics.uci.edu"));
/// assert!(matches_wildcard("*.ics.uci.edu", "wics.ics.uci.edu"));
/// assert!(!matches_wildcard("*.ics.uci.edu", "physics.uci.edu"));
/// ```
pub fn matches_wildcard(pattern: &str, candidate: &str) -> bool {
    if let Some(base) = pattern.strip_prefix("*.") {
        candidate == base
            || candidate
                .strip_suffix(base)
                .is_some_and(|rest| rest.ends_with('.'))
    } else {
        candidate == pattern
    }
}

/// The set of hosts and host+path prefixes a crawl may follow
#[derive(Debug, Clone)]
pub struct Scope {
    domains: Vec<String>,
    paths: Vec<String>,
}

impl Scope {
    /// Builds a scope from configuration, lowercasing domain patterns
    pub fn new(config: &ScopeConfig) -> Self {
        Self {
            domains: config
                .allowed_domains
                .iter()
                .map(|d| d.to_lowercase())
                .collect(),
            paths: config.allowed_paths.clone(),
        }
    }

    /// Returns true if the URL's host matches an allowed domain, or its
    /// host+path starts with an allowed path prefix
    pub fn allows(&self, url: &Url) -> bool {
        let Some(host) = url.host_str() else {
            return false;
        };
        let host = host.to_lowercase();

        if self.domains.iter().any(|p| matches_wildcard(p, &host)) {
            return true;
        }

        let location = format!("{}{}", host, url.path());
        self.paths.iter().any(|prefix| location.starts_with(prefix.as_str()))
    }
}
