//! URL handling module for Page-Sieve
//!
//! This module provides URL normalization (the deduplication key), domain
//! helpers, and crawl-scope matching.

mod domain;
mod matcher;
mod normalize;

pub use domain::{extract_domain, subdomain_label};
pub use matcher::{matches_wildcard, Scope};
pub use normalize::{is_ignored_param, normalize_parsed, normalize_url, parse_url, NormalizedUrl};
