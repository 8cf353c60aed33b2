use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};

/// Splits page text on whitespace
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
}

/// Normalizes a raw token into a countable word
///
/// Surrounding punctuation is trimmed and the word is lowercased. Returns
/// `None` for tokens with fewer than two alphanumeric characters.
pub fn countable_word(token: &str) -> Option<String> {
    let trimmed = token.trim_matches(|c: char| !c.is_alphanumeric());
    if trimmed.chars().filter(|c| c.is_alphanumeric()).count() < 2 {
        return None;
    }
    Some(trimmed.to_lowercase())
}

/// Word counts for a single page, merged into the global table in one step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageTally {
    /// Whitespace-separated token count of the page text
    pub token_count: usize,
    /// Counted words in first-occurrence order
    pub words: Vec<(String, u64)>,
}

impl PageTally {
    /// Tokenizes `text`, skipping stop words and short tokens
    pub fn from_text(text: &str, stop_words: &HashSet<String>) -> Self {
        let mut token_count = 0;
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut words: Vec<(String, u64)> = Vec::new();

        for token in tokenize(text) {
            token_count += 1;

            let Some(word) = countable_word(token) else {
                continue;
            };
            if stop_words.contains(&word) {
                continue;
            }

            match index.get(&word) {
                Some(&i) => words[i].1 += 1,
                None => {
                    index.insert(word.clone(), words.len());
                    words.push((word, 1));
                }
            }
        }

        Self { token_count, words }
    }
}

#[derive(Debug, Clone, Copy)]
struct WordEntry {
    count: u64,
    first_seen: u64,
}

/// Global word counts, never decremented
///
/// Remembers the order in which words were first counted so ties in the
/// top-N ranking are broken deterministically.
#[derive(Debug, Default)]
pub struct WordFrequencyTable {
    entries: HashMap<String, WordEntry>,
    next_order: u64,
}

impl WordFrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one page's counts to the table
    pub fn merge(&mut self, tally: &PageTally) {
        for (word, count) in &tally.words {
            let next_order = &mut self.next_order;
            let entry = self.entries.entry(word.clone()).or_insert_with(|| {
                let entry = WordEntry {
                    count: 0,
                    first_seen: *next_order,
                };
                *next_order += 1;
                entry
            });
            entry.count += count;
        }
    }

    /// The `n` most frequent words, by descending count then first occurrence
    pub fn most_common(&self, n: usize) -> Vec<(String, u64)> {
        let mut ranked: Vec<(&String, &WordEntry)> = self.entries.iter().collect();
        ranked.sort_by_key(|(_, e)| (Reverse(e.count), e.first_seen));
        ranked
            .into_iter()
            .take(n)
            .map(|(word, e)| (word.clone(), e.count))
            .collect()
    }
}
