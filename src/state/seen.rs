use crate::url::NormalizedUrl;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Outcome of recording a page visit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// First visit to this page
    New,
    /// Already visited, outside the revisit window
    Revisited,
    /// Already visited within the revisit window
    RapidRevisit,
}

/// Registry of visited pages keyed by normalized URL
///
/// Each entry holds the last visit time. The registry only grows for the
/// life of the crawl.
#[derive(Debug, Default)]
pub struct SeenRegistry {
    visits: HashMap<NormalizedUrl, Instant>,
}

impl SeenRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a visit to `key` at `now`
    ///
    /// The check and the insert happen in one step, so a caller holding
    /// exclusive access gets exactly one [`Visit::New`] per key. A repeat
    /// visit refreshes the stored timestamp.
    pub fn visit(&mut self, key: &NormalizedUrl, now: Instant, window: Duration) -> Visit {
        match self.visits.get_mut(key) {
            None => {
                self.visits.insert(key.clone(), now);
                Visit::New
            }
            Some(last) => {
                let rapid = now.saturating_duration_since(*last) <= window;
                *last = now;
                if rapid {
                    Visit::RapidRevisit
                } else {
                    Visit::Revisited
                }
            }
        }
    }

    /// Returns true if the page has been visited
    pub fn contains(&self, key: &NormalizedUrl) -> bool {
        self.visits.contains_key(key)
    }

    /// Number of unique pages visited
    pub fn len(&self) -> usize {
        self.visits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }
}
