use crate::stats::DEFAULT_STOP_WORDS;
use serde::Deserialize;

/// Main configuration structure for Page-Sieve
///
/// Every section falls back to its defaults, so an empty TOML file yields
/// the reference thresholds.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub admission: AdmissionConfig,
    pub traps: TrapConfig,
    pub scope: ScopeConfig,
    pub statistics: StatisticsConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
}

/// Thresholds used by the content admission filter
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AdmissionConfig {
    /// The only status code that is admitted
    pub success_status: u16,

    /// Declared Content-Length above which a page is skipped (bytes)
    pub max_content_length: u64,

    /// Minimum ratio of visible text bytes to raw body bytes
    pub min_text_ratio: f64,

    /// Content-Type prefixes that are never parsed
    pub excluded_content_types: Vec<String>,
}

impl Default for AdmissionConfig {
    fn default() -> Self {
        Self {
            success_status: 200,
            max_content_length: 5 * 1024 * 1024,
            min_text_ratio: 0.1,
            excluded_content_types: [
                "application/pdf",
                "application/msword",
                "application/vnd.",
                "application/zip",
                "application/x-",
                "application/octet-stream",
                "image/",
                "video/",
                "audio/",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

/// Trap detection tuning
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TrapConfig {
    /// Trailing window for discovery-rate and rapid-revisit checks (seconds)
    pub window_secs: u64,

    /// Discoveries per domain per window above which the domain is a trap
    pub discovery_rate_threshold: usize,

    /// Additional regular expressions matched against a URL's path and query
    pub extra_patterns: Vec<String>,
}

impl Default for TrapConfig {
    fn default() -> Self {
        Self {
            window_secs: 60,
            discovery_rate_threshold: 50,
            extra_patterns: Vec::new(),
        }
    }
}

/// Crawl scope: which hosts and host+path prefixes may be followed
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ScopeConfig {
    /// Domain patterns (e.g., "ics.uci.edu" or "*.ics.uci.edu")
    pub allowed_domains: Vec<String>,

    /// Host+path prefixes admitted regardless of domain (e.g., "today.uci.edu/department/x")
    pub allowed_paths: Vec<String>,
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            allowed_domains: vec![
                "*.ics.uci.edu".to_string(),
                "*.cs.uci.edu".to_string(),
                "*.informatics.uci.edu".to_string(),
                "*.stat.uci.edu".to_string(),
            ],
            allowed_paths: vec!["today.uci.edu/department/information_computer_sciences".to_string()],
        }
    }
}

/// Statistics aggregation settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct StatisticsConfig {
    /// Number of words reported in the summary
    pub top_words: usize,

    /// Words never counted in the frequency table (matched lowercase)
    pub stop_words: Vec<String>,
}

impl Default for StatisticsConfig {
    fn default() -> Self {
        Self {
            top_words: 50,
            stop_words: DEFAULT_STOP_WORDS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// User agent identification used by the one-shot fetch helper
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct UserAgentConfig {
    /// Name of the crawler
    pub crawler_name: String,

    /// Version of the crawler
    pub crawler_version: String,

    /// URL with information about the crawler
    pub contact_url: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "PageSieve".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://www.ics.uci.edu/".to_string(),
        }
    }
}
