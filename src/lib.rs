//! Page-Sieve: page admission and crawl bookkeeping for a focused crawler
//!
//! This crate decides whether a fetched page is worth keeping, extracts the
//! next URLs to visit, suppresses crawler traps, and keeps running crawl
//! statistics. Fetching, scheduling and persistence belong to the host crawler.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod stats;
pub mod trap;
pub mod url;

use thiserror::Error;

/// Main error type for Page-Sieve operations
#[derive(Debug, Error)]
pub enum SieveError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),
}

/// URL-specific errors
///
/// These are contract violations by the caller (an unparseable URL was
/// handed to the core) and are always propagated, never turned into a
/// rejection.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UrlError {
    #[error("Failed to parse URL '{url}': {reason}")]
    Parse { url: String, reason: String },

    #[error("Missing host in URL: {0}")]
    MissingHost(String),
}

/// Result type alias for Page-Sieve operations
pub type Result<T> = std::result::Result<T, SieveError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{FetchResponse, LinkVerdict, PageProcessor, RejectReason};
pub use stats::Summary;
pub use url::{normalize_url, NormalizedUrl};
