use crate::ConfigError;
use regex::Regex;
use url::{Position, Url};

/// Built-in calendar and trap patterns, matched against a URL's path and query
///
/// Each entry is (name, pattern). The name is reported when a URL is flagged.
pub const BUILTIN_TRAP_PATTERNS: &[(&str, &str)] = &[
    (
        "date archive",
        r"/(?:day|week|month|year)/\d{4}-\d{2}(?:-\d{2})?(?:/|$|\?)",
    ),
    ("event date", r"/events?/\d{4}-\d{2}(?:-\d{2})?(?:/|$|\?)"),
    ("date segment", r"/\d{4}-\d{2}-\d{2}(?:/|$|\?)"),
    ("calendar directory", r"/calendar/"),
    ("ical export", r"[?&](?:outlook-)?ical="),
    ("date parameter", r"[?&]date="),
    (
        "date-valued parameter",
        r"[?&][\w-]+=\d{4}-\d{2}(?:-\d{2})?(?:&|$)",
    ),
    ("page counter", r"[?&]page=\d+"),
    ("session id", r"(?i)session_?id="),
    ("search results", r"/search\?"),
];

#[derive(Debug, Clone)]
struct TrapPattern {
    name: String,
    regex: Regex,
}

/// Compiled table of structural trap patterns
#[derive(Debug, Clone)]
pub struct TrapPatterns {
    patterns: Vec<TrapPattern>,
}

impl TrapPatterns {
    /// Compiles the built-in table plus any extra patterns from configuration
    pub fn new(extra: &[String]) -> Result<Self, ConfigError> {
        let builtin = BUILTIN_TRAP_PATTERNS
            .iter()
            .map(|(name, pattern)| (name.to_string(), *pattern));
        let extra = extra
            .iter()
            .map(|pattern| (format!("custom: {}", pattern), pattern.as_str()));

        let patterns = builtin
            .chain(extra)
            .map(|(name, pattern)| {
                let regex = Regex::new(pattern).map_err(|e| {
                    ConfigError::InvalidPattern(format!(
                        "Invalid trap pattern '{}': {}",
                        pattern, e
                    ))
                })?;
                Ok(TrapPattern { name, regex })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(Self { patterns })
    }

    /// Returns the name of the first pattern the URL matches, if any
    pub fn matching(&self, url: &Url) -> Option<&str> {
        let target = &url[Position::BeforePath..Position::AfterQuery];
        self.patterns
            .iter()
            .find(|p| p.regex.is_match(target))
            .map(|p| p.name.as_str())
    }
}
