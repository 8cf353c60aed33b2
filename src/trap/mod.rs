//! Crawler trap detection
//!
//! Two independent checks flag a URL as a trap:
//! - Structural: the path or query matches a calendar/date/session pattern
//! - Discovery rate: the URL's domain produced more new URLs inside the
//!   trailing window than the configured threshold

mod patterns;

pub use patterns::{TrapPatterns, BUILTIN_TRAP_PATTERNS};

use crate::config::TrapConfig;
use crate::state::DomainDiscoveryWindow;
use crate::ConfigError;
use std::time::{Duration, Instant};
use url::Url;

/// Stateful trap detector
///
/// Owns the per-domain discovery window, so every call to
/// [`record_discovery`] mutates bookkeeping even when it returns false.
///
/// [`record_discovery`]: TrapDetector::record_discovery
#[derive(Debug)]
pub struct TrapDetector {
    patterns: TrapPatterns,
    discoveries: DomainDiscoveryWindow,
    rate_threshold: usize,
}

impl TrapDetector {
    /// Creates a detector from configuration
    pub fn new(config: &TrapConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            patterns: TrapPatterns::new(&config.extra_patterns)?,
            discoveries: DomainDiscoveryWindow::new(Duration::from_secs(config.window_secs)),
            rate_threshold: config.discovery_rate_threshold,
        })
    }

    /// Structural check only; has no side effects
    pub fn structural(&self, url: &Url) -> Option<&str> {
        self.patterns.matching(url)
    }

    /// Records a discovery on `domain` and returns true if the domain's
    /// recent discovery count exceeds the threshold
    pub fn record_discovery(&mut self, domain: &str, now: Instant) -> bool {
        self.discoveries.record(domain, now) > self.rate_threshold
    }

    /// Number of recent discoveries retained for `domain`
    pub fn recent_discoveries(&self, domain: &str) -> usize {
        self.discoveries.recent(domain)
    }
}
