use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

/// Per-domain discovery timestamps, pruned to a trailing window
///
/// Used to spot link farms that produce many new URLs on one domain in a
/// short time.
#[derive(Debug)]
pub struct DomainDiscoveryWindow {
    window: Duration,
    discoveries: HashMap<String, VecDeque<Instant>>,
}

impl DomainDiscoveryWindow {
    /// Creates an empty window of the given length
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            discoveries: HashMap::new(),
        }
    }

    /// Records a discovery on `domain` at `now` and returns how many
    /// discoveries remain inside the window, including this one
    ///
    /// Timestamps older than the window are pruned on every call.
    pub fn record(&mut self, domain: &str, now: Instant) -> usize {
        let window = self.window;
        let timestamps = self.discoveries.entry(domain.to_string()).or_default();

        timestamps.push_back(now);
        while let Some(&oldest) = timestamps.front() {
            if now.saturating_duration_since(oldest) > window {
                timestamps.pop_front();
            } else {
                break;
            }
        }

        timestamps.len()
    }

    /// Number of discoveries currently retained for `domain`
    pub fn recent(&self, domain: &str) -> usize {
        self.discoveries.get(domain).map_or(0, VecDeque::len)
    }
}
