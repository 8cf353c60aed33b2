//! Content admission filter
//!
//! Decides whether a fetched page is worth parsing and keeping. Checks run
//! in a fixed order and the first failing check names the rejection:
//!
//! | Check | Reason |
//! |-------|--------|
//! | Fetch produced a transport error | `FetchFailed` |
//! | Status is not the success status | `Status` |
//! | Body is not valid UTF-8 | `Undecodable` |
//! | No visible text after stripping markup | `Empty` |
//! | Content-Length unparseable | `AmbiguousLength` |
//! | Content-Length (or body size) above ceiling | `TooLarge` |
//! | Content-Type in an excluded family | `ExcludedContentType` |
//! | Visible text / raw bytes below minimum | `LowTextRatio` |
//!
//! Every heuristic failure is a rejection, never an error.

use crate::config::AdmissionConfig;
use crate::crawler::parser::visible_text;
use crate::crawler::{FetchResponse, RejectReason};
use scraper::Html;

/// A page that passed admission
pub struct AdmittedPage {
    /// The parsed document
    pub document: Html,
    /// Visible text, trimmed pieces joined by single spaces
    pub text: String,
}

impl std::fmt::Debug for AdmittedPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdmittedPage")
            .field("text_bytes", &self.text.len())
            .finish()
    }
}

/// Admission filter configured with thresholds
#[derive(Debug, Clone)]
pub struct AdmissionFilter {
    config: AdmissionConfig,
}

impl AdmissionFilter {
    pub fn new(config: AdmissionConfig) -> Self {
        Self { config }
    }

    /// Runs every admission check against a response
    pub fn admit(&self, response: &FetchResponse) -> Result<AdmittedPage, RejectReason> {
        if let Some(error) = &response.error {
            return Err(RejectReason::FetchFailed(error.clone()));
        }

        if response.status != self.config.success_status {
            return Err(RejectReason::Status(response.status));
        }

        let body =
            std::str::from_utf8(&response.body).map_err(|_| RejectReason::Undecodable)?;

        let document = Html::parse_document(body);
        let text = visible_text(&document);
        if text.is_empty() {
            return Err(RejectReason::Empty);
        }

        self.check_size(response)?;
        self.check_content_type(response)?;
        self.check_text_ratio(text.len(), response.body.len())?;

        Ok(AdmittedPage { document, text })
    }

    /// Rejects pages whose declared or actual size exceeds the ceiling
    fn check_size(&self, response: &FetchResponse) -> Result<(), RejectReason> {
        let ceiling = self.config.max_content_length;

        if let Some(raw) = response.content_length() {
            let declared: u64 = raw
                .trim()
                .parse()
                .map_err(|_| RejectReason::AmbiguousLength(raw.to_string()))?;
            if declared > ceiling {
                return Err(RejectReason::TooLarge(declared));
            }
        }

        let actual = response.body.len() as u64;
        if actual > ceiling {
            return Err(RejectReason::TooLarge(actual));
        }

        Ok(())
    }

    /// Rejects binary document, image, video and audio content types
    fn check_content_type(&self, response: &FetchResponse) -> Result<(), RejectReason> {
        let Some(content_type) = response.content_type() else {
            return Ok(());
        };

        let media_type = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        let excluded = self
            .config
            .excluded_content_types
            .iter()
            .any(|prefix| media_type.starts_with(&prefix.to_ascii_lowercase()));

        if excluded {
            Err(RejectReason::ExcludedContentType(media_type))
        } else {
            Ok(())
        }
    }

    /// Rejects template-heavy pages with little visible text per byte
    fn check_text_ratio(&self, text_bytes: usize, body_bytes: usize) -> Result<(), RejectReason> {
        let ratio = if body_bytes > 0 {
            text_bytes as f64 / body_bytes as f64
        } else {
            0.0
        };

        if ratio < self.config.min_text_ratio {
            Err(RejectReason::LowTextRatio {
                text_bytes,
                body_bytes,
            })
        } else {
            Ok(())
        }
    }
}
