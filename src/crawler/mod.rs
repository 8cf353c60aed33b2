//! Page processing pipeline
//!
//! This module contains the per-page logic the crawling host calls into:
//! - Fetched-page type and a one-shot `reqwest` adapter
//! - Content admission filtering
//! - HTML text stripping and link extraction
//! - The validity gate for outbound links
//! - The page processor tying these to shared crawl state

mod admission;
mod fetcher;
mod gate;
mod parser;
mod processor;

pub use admission::{AdmissionFilter, AdmittedPage};
pub use fetcher::{build_http_client, fetch_page, FetchResponse};
pub use gate::{ValidityGate, BLOCKED_EXTENSIONS, NON_CONTENT_PATTERNS};
pub use parser::{extract_links, visible_text, LinkCandidates};
pub use processor::{PageProcessor, PageReport, PageStatus};

use crate::url::NormalizedUrl;
use std::fmt;

/// Why a page or link was not kept
///
/// Every rejection names exactly one reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    // ===== Admission =====
    /// The fetch failed before an HTTP status was received
    FetchFailed(String),
    /// Status code other than the success status
    Status(u16),
    /// Body is not valid UTF-8
    Undecodable,
    /// No visible text after stripping markup
    Empty,
    /// Content-Length header is not a number
    AmbiguousLength(String),
    /// Declared or actual size above the ceiling
    TooLarge(u64),
    /// Content-Type in an excluded media family
    ExcludedContentType(String),
    /// Visible text is too small a share of the raw body
    LowTextRatio { text_bytes: usize, body_bytes: usize },

    // ===== Page deduplication =====
    /// Page already visited, outside the revisit window
    Duplicate,
    /// Page revisited within the trap window
    RapidRevisit,

    // ===== Link gate =====
    /// Scheme is not http or https
    Scheme(String),
    /// Host is outside the crawl scope
    OutOfScope,
    /// Upload, login, or download/share action URL
    NonContent(String),
    /// Structural calendar or trap pattern
    CalendarTrap(String),
    /// Non-text file extension
    Extension(String),
    /// Normalized form already visited
    AlreadySeen,
    /// The domain is producing new URLs faster than the threshold
    DiscoveryRate,
}

impl RejectReason {
    /// Short stable label, suitable for log fields and tallies
    pub fn label(&self) -> &'static str {
        match self {
            Self::FetchFailed(_) => "fetch-failed",
            Self::Status(_) => "status",
            Self::Undecodable => "undecodable",
            Self::Empty => "empty",
            Self::AmbiguousLength(_) => "ambiguous-length",
            Self::TooLarge(_) => "too-large",
            Self::ExcludedContentType(_) => "content-type",
            Self::LowTextRatio { .. } => "text-ratio",
            Self::Duplicate => "duplicate",
            Self::RapidRevisit => "rapid-revisit",
            Self::Scheme(_) => "scheme",
            Self::OutOfScope => "domain",
            Self::NonContent(_) => "non-content",
            Self::CalendarTrap(_) => "trap",
            Self::Extension(_) => "extension",
            Self::AlreadySeen => "dedup",
            Self::DiscoveryRate => "discovery-rate",
        }
    }

    /// Returns true for the trap family of reasons
    pub fn is_trap(&self) -> bool {
        matches!(
            self,
            Self::CalendarTrap(_) | Self::DiscoveryRate | Self::RapidRevisit
        )
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FetchFailed(error) => write!(f, "fetch failed: {}", error),
            Self::Status(code) => write!(f, "status {}", code),
            Self::Undecodable => write!(f, "body is not valid UTF-8"),
            Self::Empty => write!(f, "no visible text"),
            Self::AmbiguousLength(raw) => write!(f, "unparseable Content-Length '{}'", raw),
            Self::TooLarge(bytes) => write!(f, "too large ({} bytes)", bytes),
            Self::ExcludedContentType(ct) => write!(f, "excluded content type {}", ct),
            Self::LowTextRatio {
                text_bytes,
                body_bytes,
            } => write!(
                f,
                "low text ratio ({} text bytes of {})",
                text_bytes, body_bytes
            ),
            Self::Duplicate => write!(f, "already visited"),
            Self::RapidRevisit => write!(f, "revisited within trap window"),
            Self::Scheme(scheme) => write!(f, "unsupported scheme {}", scheme),
            Self::OutOfScope => write!(f, "outside crawl scope"),
            Self::NonContent(name) => write!(f, "non-content resource ({})", name),
            Self::CalendarTrap(name) => write!(f, "calendar trap ({})", name),
            Self::Extension(ext) => write!(f, "blocked extension .{}", ext),
            Self::AlreadySeen => write!(f, "already seen"),
            Self::DiscoveryRate => write!(f, "domain discovery rate exceeded"),
        }
    }
}

/// Decision of the validity gate for one link
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkVerdict {
    /// Follow the link; carries its normalized form
    Accept(NormalizedUrl),
    /// Drop the link
    Reject(RejectReason),
}

impl LinkVerdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accept(_))
    }

    /// The rejection reason, if rejected
    pub fn reason(&self) -> Option<&RejectReason> {
        match self {
            Self::Accept(_) => None,
            Self::Reject(reason) => Some(reason),
        }
    }
}
