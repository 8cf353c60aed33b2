//! Page processor: the frontier-feed operation
//!
//! A [`PageProcessor`] is constructed once per crawl run and owns every piece
//! of shared crawl state behind a single mutex:
//!
//! - the seen registry (dedup)
//! - the trap detector's discovery window
//! - the statistics aggregator
//!
//! Parsing, text stripping, tokenization and link extraction happen before
//! the lock is taken. Dedup check-then-insert, the statistics merge and link
//! gating then run in one critical section, so concurrent workers sharing the
//! processor through an `Arc` never both see a page as new and never
//! interleave word counts from different pages.

use crate::config::Config;
use crate::crawler::{
    extract_links, AdmissionFilter, FetchResponse, LinkVerdict, RejectReason, ValidityGate,
};
use crate::state::{SeenRegistry, Visit};
use crate::stats::{PageTally, StatisticsAggregator, Summary};
use crate::trap::TrapDetector;
use crate::url::{extract_domain, normalize_parsed, parse_url, subdomain_label, NormalizedUrl};
use crate::{ConfigResult, Result};
use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use url::Url;

/// Everything mutated while processing pages
#[derive(Debug)]
struct CrawlState {
    seen: SeenRegistry,
    traps: TrapDetector,
    stats: StatisticsAggregator,
}

/// Whether a page was kept
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageStatus {
    Admitted,
    Rejected(RejectReason),
}

/// Detailed outcome of processing one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageReport {
    /// Normalized key of the page
    pub page: NormalizedUrl,

    pub status: PageStatus,

    /// Links to enqueue, normalized and deduplicated within the page
    pub links: Vec<String>,

    /// Extracted links that were dropped, with the reason
    pub rejected: Vec<(String, RejectReason)>,
}

impl PageReport {
    fn rejected(page: NormalizedUrl, reason: RejectReason) -> Self {
        Self {
            page,
            status: PageStatus::Rejected(reason),
            links: Vec::new(),
            rejected: Vec::new(),
        }
    }

    pub fn is_admitted(&self) -> bool {
        self.status == PageStatus::Admitted
    }
}

/// Page admission and crawl bookkeeping for one crawl run
#[derive(Debug)]
pub struct PageProcessor {
    admission: AdmissionFilter,
    gate: ValidityGate,
    window: Duration,
    top_words: usize,
    stop_words: HashSet<String>,
    state: Mutex<CrawlState>,
}

impl PageProcessor {
    /// Creates a processor with fresh crawl state
    ///
    /// The configuration is validated first.
    pub fn new(config: &Config) -> ConfigResult<Self> {
        crate::config::validate(config)?;

        let stop_words = config
            .statistics
            .stop_words
            .iter()
            .map(|word| word.to_lowercase())
            .collect();

        Ok(Self {
            admission: AdmissionFilter::new(config.admission.clone()),
            gate: ValidityGate::new(&config.scope)?,
            window: Duration::from_secs(config.traps.window_secs),
            top_words: config.statistics.top_words,
            stop_words,
            state: Mutex::new(CrawlState {
                seen: SeenRegistry::new(),
                traps: TrapDetector::new(&config.traps)?,
                stats: StatisticsAggregator::new(),
            }),
        })
    }

    /// Processes one fetched page and returns the URLs to enqueue
    ///
    /// # Arguments
    ///
    /// * `url` - The URL the host requested
    /// * `response` - The fetch result for that URL
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<String>)` - Links to enqueue; empty for rejected pages
    /// * `Err(SieveError)` - `url` could not be parsed
    pub fn process_page(&self, url: &str, response: &FetchResponse) -> Result<Vec<String>> {
        self.process_page_at(url, response, Instant::now())
    }

    /// Same as [`process_page`](Self::process_page) with an explicit clock
    pub fn process_page_at(
        &self,
        url: &str,
        response: &FetchResponse,
        now: Instant,
    ) -> Result<Vec<String>> {
        Ok(self.inspect_page_at(url, response, now)?.links)
    }

    /// Processes one fetched page and reports every decision taken
    pub fn inspect_page(&self, url: &str, response: &FetchResponse) -> Result<PageReport> {
        self.inspect_page_at(url, response, Instant::now())
    }

    /// Same as [`inspect_page`](Self::inspect_page) with an explicit clock
    pub fn inspect_page_at(
        &self,
        url: &str,
        response: &FetchResponse,
        now: Instant,
    ) -> Result<PageReport> {
        let page_url = parse_url(url)?;
        let key = normalize_parsed(page_url.clone())?;

        let page = match self.admission.admit(response) {
            Ok(page) => page,
            Err(reason) => {
                tracing::debug!(url = %key, reason = reason.label(), "Page rejected: {}", reason);
                return Ok(PageReport::rejected(key, reason));
            }
        };

        // Links resolve against the final URL when the host followed redirects
        let base = match Url::parse(&response.url) {
            Ok(final_url) if !response.url.is_empty() => final_url,
            _ => page_url.clone(),
        };
        let candidates: Vec<Url> = extract_links(&page.document, &base).collect();
        let tally = PageTally::from_text(&page.text, &self.stop_words);
        let host = extract_domain(&page_url).unwrap_or_default();

        let mut state = self.lock();

        match state.seen.visit(&key, now, self.window) {
            Visit::New => {}
            Visit::Revisited => {
                tracing::debug!(url = %key, "Page rejected: already visited");
                return Ok(PageReport::rejected(key, RejectReason::Duplicate));
            }
            Visit::RapidRevisit => {
                tracing::warn!(url = %key, "Rapid revisit within {:?}", self.window);
                return Ok(PageReport::rejected(key, RejectReason::RapidRevisit));
            }
        }

        state
            .stats
            .record_page(&key, subdomain_label(&host), &tally);
        tracing::info!(
            url = %key,
            tokens = tally.token_count,
            links = candidates.len(),
            "Page admitted"
        );

        let mut links = Vec::new();
        let mut rejected = Vec::new();
        let mut emitted: HashSet<NormalizedUrl> = HashSet::new();
        let CrawlState { seen, traps, .. } = &mut *state;

        for candidate in candidates {
            let verdict = match self.gate.evaluate_url(&candidate, seen, traps) {
                Ok(verdict) => verdict,
                Err(e) => {
                    tracing::warn!("Dropping link {} from {}: {}", candidate, key, e);
                    continue;
                }
            };

            let link = match verdict {
                LinkVerdict::Accept(link) => link,
                LinkVerdict::Reject(reason) => {
                    if reason.is_trap() {
                        tracing::warn!(link = %candidate, "Potential crawler trap: {}", reason);
                    } else {
                        tracing::debug!(link = %candidate, reason = reason.label(), "Link rejected: {}", reason);
                    }
                    rejected.push((candidate.to_string(), reason));
                    continue;
                }
            };

            if !emitted.insert(link.clone()) {
                continue;
            }

            let domain = extract_domain(&candidate).unwrap_or_default();
            if traps.record_discovery(&domain, now) {
                tracing::warn!(
                    link = %link,
                    domain = %domain,
                    recent = traps.recent_discoveries(&domain),
                    "Discovery rate trap"
                );
                rejected.push((link.into_string(), RejectReason::DiscoveryRate));
                continue;
            }

            links.push(link.into_string());
        }

        Ok(PageReport {
            page: key,
            status: PageStatus::Admitted,
            links,
            rejected,
        })
    }

    /// Runs the validity gate on one URL and reports its verdict
    ///
    /// Reads the seen registry and trap patterns; records nothing.
    pub fn evaluate_link(&self, url: &str) -> Result<LinkVerdict> {
        let state = self.lock();
        Ok(self.gate.evaluate(url, &state.seen, &state.traps)?)
    }

    /// Boolean form of [`evaluate_link`](Self::evaluate_link)
    pub fn is_valid(&self, url: &str) -> Result<bool> {
        Ok(self.evaluate_link(url)?.is_accepted())
    }

    /// Builds the end-of-crawl report
    pub fn summary(&self) -> Summary {
        let state = self.lock();
        state.stats.summary(state.seen.len(), self.top_words)
    }

    /// Number of unique pages admitted so far
    pub fn unique_pages(&self) -> usize {
        self.lock().seen.len()
    }

    fn lock(&self) -> MutexGuard<'_, CrawlState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
