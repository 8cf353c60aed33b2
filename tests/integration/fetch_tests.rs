//! Tests of the reqwest fetch adapter against a mock HTTP server

use page_sieve::config::{AdmissionConfig, Config, ScopeConfig, UserAgentConfig};
use page_sieve::crawler::{build_http_client, fetch_page, PageProcessor, PageStatus};
use page_sieve::RejectReason;
use wiremock::matchers::{header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a configuration whose scope is the mock server host
fn create_test_config() -> Config {
    Config {
        admission: AdmissionConfig {
            min_text_ratio: 0.0,
            ..Default::default()
        },
        scope: ScopeConfig {
            allowed_domains: vec!["127.0.0.1".to_string()],
            allowed_paths: vec![],
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0.0".to_string(),
            contact_url: "https://example.com/contact".to_string(),
        },
        ..Default::default()
    }
}

#[tokio::test]
async fn test_fetch_page_captures_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header_regex("user-agent", r"^TestBot/1\.0\.0 \(\+https://example\.com/contact\)$"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<html><body><p>Home</p></body></html>", "text/html"),
        )
        .mount(&mock_server)
        .await;

    let config = create_test_config();
    let client = build_http_client(&config.user_agent).unwrap();
    let url = format!("{}/", mock_server.uri());

    let response = fetch_page(&client, &url).await;

    assert_eq!(response.status, 200);
    assert!(response.error.is_none());
    assert_eq!(response.url, url);
    assert_eq!(response.content_type(), Some("text/html"));
    assert_eq!(response.body, b"<html><body><p>Home</p></body></html>".to_vec());
}

#[tokio::test]
async fn test_fetched_page_is_processed() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/index.html"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(
                    r#"<html><head><title>Lab</title></head><body>
                    <a href="/people">People</a>
                    <a href="/people#staff">Staff</a>
                    <a href="/slides.pptx">Slides</a>
                    <a href="https://evil.com/">Elsewhere</a>
                    </body></html>"#,
                    "text/html; charset=utf-8",
                ),
        )
        .mount(&mock_server)
        .await;

    let config = create_test_config();
    let processor = PageProcessor::new(&config).unwrap();
    let client = build_http_client(&config.user_agent).unwrap();
    let url = format!("{}/index.html", base_url);

    let response = fetch_page(&client, &url).await;
    let report = processor.inspect_page(&url, &response).unwrap();

    assert_eq!(report.status, PageStatus::Admitted);
    assert_eq!(report.links, vec![format!("{}/people", base_url)]);

    let reasons: Vec<_> = report.rejected.iter().map(|(_, reason)| reason.clone()).collect();
    assert_eq!(
        reasons,
        vec![
            RejectReason::Extension("pptx".to_string()),
            RejectReason::OutOfScope
        ]
    );

    let summary = processor.summary();
    assert_eq!(summary.unique_pages, 1);
    assert_eq!(summary.subdomains, vec![("127".to_string(), 1)]);
}

#[tokio::test]
async fn test_not_found_is_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("<p>Not found</p>"))
        .mount(&mock_server)
        .await;

    let config = create_test_config();
    let processor = PageProcessor::new(&config).unwrap();
    let client = build_http_client(&config.user_agent).unwrap();
    let url = format!("{}/missing", mock_server.uri());

    let response = fetch_page(&client, &url).await;
    assert_eq!(response.status, 404);

    let links = processor.process_page(&url, &response).unwrap();
    assert!(links.is_empty());
    assert_eq!(processor.summary().unique_pages, 0);
}

#[tokio::test]
async fn test_binary_content_type_is_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/report"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<p>%PDF-1.7 looks like text</p>", "application/pdf"),
        )
        .mount(&mock_server)
        .await;

    let config = create_test_config();
    let processor = PageProcessor::new(&config).unwrap();
    let client = build_http_client(&config.user_agent).unwrap();
    let url = format!("{}/report", mock_server.uri());

    let response = fetch_page(&client, &url).await;
    let report = processor.inspect_page(&url, &response).unwrap();

    assert_eq!(
        report.status,
        PageStatus::Rejected(RejectReason::ExcludedContentType(
            "application/pdf".to_string()
        ))
    );
}

#[tokio::test]
async fn test_connection_failure_becomes_failed_response() {
    // Bind and drop a listener to get a port nothing is listening on
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let config = create_test_config();
    let processor = PageProcessor::new(&config).unwrap();
    let client = build_http_client(&config.user_agent).unwrap();
    let url = format!("http://127.0.0.1:{}/", port);

    let response = fetch_page(&client, &url).await;
    assert_eq!(response.status, 0);
    assert!(response.error.is_some());

    let report = processor.inspect_page(&url, &response).unwrap();
    assert!(matches!(
        report.status,
        PageStatus::Rejected(RejectReason::FetchFailed(_))
    ));
}
