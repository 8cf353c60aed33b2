//! HTML parsing: visible text and outbound link candidates
//!
//! Link candidates come from:
//! - `<a href="...">` and `<area href="...">` elements
//! - `<meta http-equiv="refresh" content="N; url=...">` redirects
//!
//! Relative targets are resolved against the page URL (or a `<base href>`
//! when the page declares one). Filtering is left to the validity gate.

use scraper::{Html, Selector};
use url::Url;

/// Elements whose text is never visible to a reader
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Extracts the visible text of a document
///
/// Text nodes are trimmed and joined with single spaces; script, style,
/// noscript and template contents are skipped.
pub fn visible_text(document: &Html) -> String {
    let mut pieces: Vec<&str> = Vec::new();

    for node in document.tree.root().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|element| HIDDEN_ELEMENTS.contains(&element.name()))
        });
        if hidden {
            continue;
        }

        let trimmed = text.trim();
        if !trimmed.is_empty() {
            pieces.push(trimmed);
        }
    }

    pieces.join(" ")
}

/// Outbound link candidates of one page
///
/// A finite sequence that can be consumed once.
#[derive(Debug)]
pub struct LinkCandidates {
    links: std::vec::IntoIter<Url>,
}

impl Iterator for LinkCandidates {
    type Item = Url;

    fn next(&mut self) -> Option<Self::Item> {
        self.links.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.links.size_hint()
    }
}

/// Collects link candidates from a parsed document
///
/// # Arguments
///
/// * `document` - The parsed page
/// * `page_url` - The URL the page was served from
pub fn extract_links(document: &Html, page_url: &Url) -> LinkCandidates {
    let base = document_base(document, page_url);
    let mut links = Vec::new();

    if let Ok(selector) = Selector::parse("a[href], area[href]") {
        for element in document.select(&selector) {
            // Explicit downloads are files, not pages
            if element.value().attr("download").is_some() {
                continue;
            }
            if let Some(link) = element.value().attr("href").and_then(|h| resolve_link(h, &base)) {
                links.push(link);
            }
        }
    }

    if let Ok(selector) = Selector::parse("meta[http-equiv][content]") {
        for element in document.select(&selector) {
            let is_refresh = element
                .value()
                .attr("http-equiv")
                .is_some_and(|v| v.trim().eq_ignore_ascii_case("refresh"));
            if !is_refresh {
                continue;
            }
            if let Some(link) = element
                .value()
                .attr("content")
                .and_then(refresh_target)
                .and_then(|target| resolve_link(target, &base))
            {
                links.push(link);
            }
        }
    }

    LinkCandidates {
        links: links.into_iter(),
    }
}

/// Returns the `<base href>` of the document resolved against the page URL,
/// or the page URL itself
fn document_base(document: &Html, page_url: &Url) -> Url {
    Selector::parse("base[href]")
        .ok()
        .and_then(|selector| {
            document
                .select(&selector)
                .next()
                .and_then(|element| element.value().attr("href"))
                .and_then(|href| page_url.join(href.trim()).ok())
        })
        .unwrap_or_else(|| page_url.clone())
}

/// Extracts the target from a meta refresh `content` value such as
/// `5; url=/next`, `0;URL='https://example.com/'` or `0, URL = /next`
fn refresh_target(content: &str) -> Option<&str> {
    let (_, rest) = content.split_once(|c: char| c == ';' || c == ',')?;
    let (key, value) = rest.split_once('=')?;
    if !key.trim().eq_ignore_ascii_case("url") {
        return None;
    }

    let target = value.trim().trim_matches(|c: char| c == '\'' || c == '"').trim();
    (!target.is_empty()).then_some(target)
}

/// Resolves an href against the base URL
///
/// Empty and fragment-only hrefs point back at the page and are dropped, as
/// are hrefs that cannot be resolved at all.
fn resolve_link(href: &str, base: &Url) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    match base.join(href) {
        Ok(url) => Some(url),
        Err(e) => {
            tracing::trace!("Dropping unresolvable href '{}': {}", href, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://www.ics.uci.edu/about/index.html").unwrap()
    }

    fn links(html: &str) -> Vec<String> {
        let document = Html::parse_document(html);
        extract_links(&document, &base_url())
            .map(|u| u.to_string())
            .collect()
    }

    #[test]
    fn test_visible_text() {
        let document = Html::parse_document(
            "<html><head><title>Home</title><style>p{}</style></head>\
             <body><p>Hello <b>world</b></p><script>var x = 1;</script></body></html>",
        );
        assert_eq!(visible_text(&document), "Home Hello world");
    }

    #[test]
    fn test_visible_text_of_markup_only_page() {
        let document = Html::parse_document("<html><body><div> </div><!-- note --></body></html>");
        assert_eq!(visible_text(&document), "");
    }

    #[test]
    fn test_extract_relative_and_absolute() {
        let found = links(
            r#"<body><a href="/a">A</a><a href="people.html">B</a><a href="http://evil.com/x">X</a></body>"#,
        );
        assert_eq!(
            found,
            vec![
                "https://www.ics.uci.edu/a",
                "https://www.ics.uci.edu/about/people.html",
                "http://evil.com/x",
            ]
        );
    }

    #[test]
    fn test_extract_area_links() {
        let found = links(r#"<map><area href="/map/room" shape="rect"></map>"#);
        assert_eq!(found, vec!["https://www.ics.uci.edu/map/room"]);
    }

    #[test]
    fn test_extract_meta_refresh() {
        let found = links(
            r#"<head><meta http-equiv="Refresh" content="0; URL='/moved'"></head><body></body>"#,
        );
        assert_eq!(found, vec!["https://www.ics.uci.edu/moved"]);
    }

    #[test]
    fn test_extract_meta_refresh_loose_syntax() {
        let found = links(
            r#"<head><meta http-equiv="refresh" content="0, URL = '/moved'"></head><body></body>"#,
        );
        assert_eq!(found, vec!["https://www.ics.uci.edu/moved"]);
    }

    #[test]
    fn test_ignores_other_meta() {
        let found = links(
            r#"<head><meta http-equiv="content-type" content="text/html; charset=utf-8"></head>"#,
        );
        assert!(found.is_empty());
    }

    #[test]
    fn test_base_href() {
        let found = links(
            r#"<head><base href="https://www.stat.uci.edu/dept/"></head><body><a href="news">N</a></body>"#,
        );
        assert_eq!(found, vec!["https://www.stat.uci.edu/dept/news"]);
    }

    #[test]
    fn test_skip_fragment_empty_and_download() {
        let found = links(
            r##"<body><a href="#top">Top</a><a href="">Self</a><a href="/f.pdf" download>F</a></body>"##,
        );
        assert!(found.is_empty());
    }

    #[test]
    fn test_non_http_schemes_are_kept_for_the_gate() {
        let found = links(r#"<body><a href="mailto:someone@uci.edu">Mail</a></body>"#);
        assert_eq!(found, vec!["mailto:someone@uci.edu"]);
    }

    #[test]
    fn test_refresh_target() {
        assert_eq!(refresh_target("5; url=/next"), Some("/next"));
        assert_eq!(refresh_target("0;URL=\"https://x.edu/\""), Some("https://x.edu/"));
        assert_eq!(refresh_target("30"), None);
        assert_eq!(refresh_target("5; url="), None);
        assert_eq!(refresh_target("0; URL = /next"), Some("/next"));
        assert_eq!(refresh_target("0, url=/x"), Some("/x"));
        assert_eq!(refresh_target("3; target=/x"), None);
    }

    #[test]
    fn test_candidates_are_consumed_once() {
        let document = Html::parse_document(r#"<a href="/a">A</a>"#);
        let mut candidates = extract_links(&document, &base_url());
        assert_eq!(candidates.size_hint(), (1, Some(1)));
        assert!(candidates.next().is_some());
        assert!(candidates.next().is_none());
    }
}
