//! Validity gate for outbound links
//!
//! Checks run in order; the first failure names the rejection:
//!
//! 1. Scheme is http or https
//! 2. Host (or host+path) is inside the crawl scope
//! 3. Not an upload, file-serving, login, or download/share action URL
//! 4. Not a structural calendar/trap URL
//! 5. Path extension is not a non-text file type
//! 6. Normalized form not already in the seen registry
//!
//! The gate is pure: it reads the seen registry and the trap patterns but
//! records nothing. The page processor applies the discovery-rate check to
//! links that pass.

use crate::config::ScopeConfig;
use crate::crawler::{LinkVerdict, RejectReason};
use crate::state::SeenRegistry;
use crate::trap::TrapDetector;
use crate::url::{normalize_parsed, parse_url, Scope};
use crate::{ConfigError, UrlError};
use regex::Regex;
use url::{Position, Url};

/// File extensions that never hold crawlable text
pub const BLOCKED_EXTENSIONS: &[&str] = &[
    "css", "js", "bmp", "gif", "jpe?g", "ico", "png", "tiff?", "svg", "webp", "mid", "mp2",
    "mp3", "mp4", "wav", "avi", "mov", "mpeg", "ram", "m4v", "mkv", "ogg", "ogv", "webm", "pdf",
    "ps", "eps", "tex", "bib", "ppt", "pptx", "doc", "docx", "xls", "xlsx", "odt", "names",
    "data", "dat", "exe", "bz2", "tar", "msi", "bin", "7z", "psd", "dmg", "iso", "epub", "dll",
    "cnf", "tgz", "sha1", "thmx", "mso", "arff", "rtf", "jar", "csv", "rm", "smil", "wmv",
    "swf", "wma", "zip", "rar", "gz", "apk", "img", "war", "sql", "mat", "npy", "pkl", "ipynb",
];

/// Path and query patterns of non-content or auth-walled resources
///
/// Each entry is (name, pattern), matched against the path and query.
pub const NON_CONTENT_PATTERNS: &[(&str, &str)] = &[
    ("uploads", r"(?i)/(?:wp-content/)?uploads?/"),
    (
        "file server",
        r"(?i)/(?:files|attachments?|raw-attachment|downloads?)/",
    ),
    (
        "login page",
        r"(?i)/(?:login|log-in|signin|sign-in|logon|wp-login\.php|wp-admin)(?:[/?.]|$)",
    ),
    (
        "download or login action",
        r"(?i)[?&](?:action|do)=(?:download|login|share|export|edit|upload|media)",
    ),
    ("share link", r"(?i)[?&](?:share|download|login|redirect_to)="),
];

/// Composite predicate deciding whether a link is worth following
#[derive(Debug, Clone)]
pub struct ValidityGate {
    scope: Scope,
    extensions: Regex,
    non_content: Vec<(String, Regex)>,
}

impl ValidityGate {
    /// Builds the gate for a crawl scope
    pub fn new(scope: &ScopeConfig) -> Result<Self, ConfigError> {
        let extensions = Regex::new(&format!(r"\.({})$", BLOCKED_EXTENSIONS.join("|")))
            .map_err(|e| ConfigError::InvalidPattern(format!("Invalid extension table: {}", e)))?;

        let non_content = NON_CONTENT_PATTERNS
            .iter()
            .map(|(name, pattern)| {
                Regex::new(pattern)
                    .map(|regex| (name.to_string(), regex))
                    .map_err(|e| {
                        ConfigError::InvalidPattern(format!("Invalid pattern '{}': {}", pattern, e))
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            scope: Scope::new(scope),
            extensions,
            non_content,
        })
    }

    /// Evaluates a URL string
    ///
    /// # Returns
    ///
    /// * `Ok(LinkVerdict)` - Accepted (with its normalized key) or rejected with a reason
    /// * `Err(UrlError)` - The URL could not be parsed
    pub fn evaluate(
        &self,
        url: &str,
        seen: &SeenRegistry,
        traps: &TrapDetector,
    ) -> Result<LinkVerdict, UrlError> {
        self.evaluate_url(&parse_url(url)?, seen, traps)
    }

    /// Evaluates an already-parsed URL
    pub fn evaluate_url(
        &self,
        url: &Url,
        seen: &SeenRegistry,
        traps: &TrapDetector,
    ) -> Result<LinkVerdict, UrlError> {
        if !matches!(url.scheme(), "http" | "https") {
            return Ok(LinkVerdict::Reject(RejectReason::Scheme(
                url.scheme().to_string(),
            )));
        }

        if !self.scope.allows(url) {
            return Ok(LinkVerdict::Reject(RejectReason::OutOfScope));
        }

        if let Some(name) = self.non_content(url) {
            return Ok(LinkVerdict::Reject(RejectReason::NonContent(name.to_string())));
        }

        if let Some(name) = traps.structural(url) {
            return Ok(LinkVerdict::Reject(RejectReason::CalendarTrap(name.to_string())));
        }

        if let Some(extension) = self.blocked_extension(url) {
            return Ok(LinkVerdict::Reject(RejectReason::Extension(extension)));
        }

        let key = normalize_parsed(url.clone())?;
        if seen.contains(&key) {
            return Ok(LinkVerdict::Reject(RejectReason::AlreadySeen));
        }

        Ok(LinkVerdict::Accept(key))
    }

    fn non_content(&self, url: &Url) -> Option<&str> {
        let target = &url[Position::BeforePath..Position::AfterQuery];
        self.non_content
            .iter()
            .find(|(_, regex)| regex.is_match(target))
            .map(|(name, _)| name.as_str())
    }

    fn blocked_extension(&self, url: &Url) -> Option<String> {
        let path = url.path().to_lowercase();
        self.extensions
            .captures(&path)
            .and_then(|captures| captures.get(1))
            .map(|m| m.as_str().to_string())
    }
}
