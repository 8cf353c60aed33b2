//! End-to-end tests of the page processor with synthetic fetch results

use page_sieve::config::{load_config, AdmissionConfig, Config};
use page_sieve::crawler::{PageProcessor, PageStatus};
use page_sieve::{normalize_url, FetchResponse, RejectReason};
use std::io::Write;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default configuration with the text-ratio floor disabled, so short
/// markup-heavy fixtures are admitted
fn permissive_config() -> Config {
    Config {
        admission: AdmissionConfig {
            min_text_ratio: 0.0,
            ..Default::default()
        },
        ..Default::default()
    }
}

fn html(url: &str, body: &str) -> FetchResponse {
    FetchResponse::new(url, 200, body).with_header("Content-Type", "text/html; charset=utf-8")
}

#[test]
fn test_single_page_yields_only_in_scope_link() {
    let processor = PageProcessor::new(&permissive_config()).unwrap();
    let body = r#"<html><body><a href="/a">A</a><a href="http://evil.com/x">X</a></body></html>"#;

    let links = processor
        .process_page("http://www.ics.uci.edu/", &html("http://www.ics.uci.edu/", body))
        .unwrap();

    assert_eq!(links, vec!["http://www.ics.uci.edu/a".to_string()]);
}

#[test]
fn test_markup_heavy_page_rejected_under_default_ratio() {
    let processor = PageProcessor::new(&Config::default()).unwrap();
    let body = r#"<html><body><a href="/a">A</a><a href="http://evil.com/x">X</a></body></html>"#;

    let report = processor
        .inspect_page("http://www.ics.uci.edu/", &html("http://www.ics.uci.edu/", body))
        .unwrap();

    assert!(matches!(
        report.status,
        PageStatus::Rejected(RejectReason::LowTextRatio { .. })
    ));
    assert!(report.links.is_empty());
    assert_eq!(processor.summary().unique_pages, 0);
}

#[test]
fn test_equivalent_urls_are_deduplicated() {
    let processor = PageProcessor::new(&permissive_config()).unwrap();
    let url = "https://www.ics.uci.edu/community/news/?b=2&a=1";

    processor
        .process_page(url, &html(url, "<p>News from the school</p>"))
        .unwrap();

    for variant in [
        "https://www.ics.uci.edu/community/news/?a=1&b=2",
        "https://www.ics.uci.edu/community/news/?a=1&b=2#latest",
        "https://www.ics.uci.edu/community/news/?utm_campaign=x&b=2&a=1",
        "https://user:pw@www.ics.uci.edu/community/news/?a=1&b=2",
    ] {
        assert_eq!(normalize_url(variant).unwrap(), normalize_url(url).unwrap());
        assert!(!processor.is_valid(variant).unwrap(), "{} passed the gate", variant);
    }
}

#[test]
fn test_structural_traps() {
    let processor = PageProcessor::new(&Config::default()).unwrap();

    assert!(!processor
        .is_valid("https://example.ics.uci.edu/events/2024-01-01")
        .unwrap());
    assert!(processor.is_valid("https://example.ics.uci.edu/about").unwrap());
}

#[test]
fn test_discovery_burst_flags_fifty_first_link() {
    let processor = PageProcessor::new(&permissive_config()).unwrap();
    let anchors: String = (0..51)
        .map(|i| format!(r#"<a href="/people/{}">Person {}</a>"#, i, i))
        .collect();
    let body = format!("<html><body><p>Directory</p>{}</body></html>", anchors);

    let report = processor
        .inspect_page("https://www.ics.uci.edu/people", &html("https://www.ics.uci.edu/people", &body))
        .unwrap();

    assert_eq!(report.links.len(), 50);
    assert_eq!(
        report.rejected,
        vec![(
            "https://www.ics.uci.edu/people/50".to_string(),
            RejectReason::DiscoveryRate
        )]
    );
}

#[test]
fn test_spread_out_discoveries_never_flag() {
    let processor = PageProcessor::new(&permissive_config()).unwrap();
    let start = Instant::now();

    for i in 0..60u64 {
        let url = format!("https://www.ics.uci.edu/archive/{}", i);
        let body = format!(r#"<p>Archive entry</p><a href="/archive/next-{}">Next</a>"#, i);
        let now = start + Duration::from_secs(61 * i);

        let report = processor.inspect_page_at(&url, &html(&url, &body), now).unwrap();

        assert!(report.is_admitted());
        assert_eq!(report.links.len(), 1, "link {} was flagged", i);
    }
}

#[test]
fn test_summary_after_crawl() {
    let processor = PageProcessor::new(&permissive_config()).unwrap();
    let pages = [
        ("https://wics.ics.uci.edu/", "<p>Women in computing events and mentoring</p>"),
        ("https://wics.ics.uci.edu/about", "<p>Mentoring for computing students</p>"),
        ("https://vision.ics.uci.edu/", "<p>Computer vision research</p>"),
        (
            "https://today.uci.edu/department/information_computer_sciences/",
            "<p>Computing news</p>",
        ),
    ];

    for (url, body) in pages {
        processor.process_page(url, &html(url, body)).unwrap();
    }

    let summary = processor.summary();
    assert_eq!(summary.unique_pages, 4);
    assert_eq!(
        summary.subdomains,
        vec![
            ("today".to_string(), 1),
            ("vision".to_string(), 1),
            ("wics".to_string(), 2),
        ]
    );
    assert_eq!(summary.top_words[0], ("computing".to_string(), 3));
    assert_eq!(summary.top_words[1], ("mentoring".to_string(), 2));

    let longest = summary.longest_page.unwrap();
    assert_eq!(longest.url, "https://wics.ics.uci.edu/");
    assert_eq!(longest.token_count, 6);
}

#[test]
fn test_config_file_drives_processing() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[admission]
min-text-ratio = 0.0

[scope]
allowed-domains = ["*.example.edu"]
allowed-paths = []

[statistics]
top-words = 1
"#
    )
    .unwrap();

    let config = load_config(file.path()).unwrap();
    let processor = PageProcessor::new(&config).unwrap();
    let body = r#"<p>lab lab notes</p><a href="https://cs.example.edu/x">X</a><a href="https://www.ics.uci.edu/y">Y</a>"#;

    let links = processor
        .process_page("https://www.example.edu/", &html("https://www.example.edu/", body))
        .unwrap();

    assert_eq!(links, vec!["https://cs.example.edu/x".to_string()]);
    assert_eq!(processor.summary().top_words, vec![("lab".to_string(), 2)]);
}

#[test]
fn test_shared_processor_across_threads() {
    let processor = Arc::new(PageProcessor::new(&permissive_config()).unwrap());

    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let processor = Arc::clone(&processor);
            std::thread::spawn(move || {
                for page in 0..10 {
                    let url = format!("https://www.ics.uci.edu/w{}/p{}", worker, page);
                    processor
                        .process_page(&url, &html(&url, "<p>algorithms seminar</p>"))
                        .unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let summary = processor.summary();
    assert_eq!(summary.unique_pages, 40);
    assert!(summary.top_words.contains(&("algorithms".to_string(), 40)));
    assert_eq!(summary.subdomains, vec![("www".to_string(), 40)]);
}
