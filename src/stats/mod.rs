//! Running crawl statistics
//!
//! Aggregates, per admitted page, the longest page by token count, global
//! word frequencies (stop words excluded) and per-subdomain unique-page
//! counts, and produces the end-of-crawl summary.

mod stopwords;
mod words;

pub use stopwords::DEFAULT_STOP_WORDS;
pub use words::{countable_word, tokenize, PageTally, WordFrequencyTable};

use crate::url::NormalizedUrl;
use serde::Serialize;
use std::collections::BTreeMap;

/// The longest page seen so far
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LongestPage {
    pub url: String,
    pub token_count: usize,
}

/// End-of-crawl report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Total unique admitted pages
    pub unique_pages: usize,

    /// Longest page by whitespace token count
    pub longest_page: Option<LongestPage>,

    /// Most frequent words, by descending count then first occurrence
    pub top_words: Vec<(String, u64)>,

    /// Unique pages per subdomain label, sorted alphabetically
    pub subdomains: Vec<(String, u64)>,
}

/// Incremental statistics for admitted pages
#[derive(Debug, Default)]
pub struct StatisticsAggregator {
    longest: Option<LongestPage>,
    words: WordFrequencyTable,
    subdomains: BTreeMap<String, u64>,
}

impl StatisticsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one newly admitted page
    ///
    /// The longest-page record is replaced only on a strictly greater token
    /// count. The whole tally is merged at once.
    pub fn record_page(&mut self, url: &NormalizedUrl, subdomain: &str, tally: &PageTally) {
        let is_longest = self
            .longest
            .as_ref()
            .map_or(true, |current| tally.token_count > current.token_count);
        if is_longest {
            self.longest = Some(LongestPage {
                url: url.to_string(),
                token_count: tally.token_count,
            });
        }

        self.words.merge(tally);
        *self.subdomains.entry(subdomain.to_string()).or_insert(0) += 1;
    }

    /// Builds the summary report
    ///
    /// `unique_pages` is supplied by the caller, which owns the seen registry.
    pub fn summary(&self, unique_pages: usize, top_words: usize) -> Summary {
        Summary {
            unique_pages,
            longest_page: self.longest.clone(),
            top_words: self.words.most_common(top_words),
            subdomains: self
                .subdomains
                .iter()
                .map(|(label, count)| (label.clone(), *count))
                .collect(),
        }
    }
}
