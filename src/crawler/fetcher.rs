//! Fetched-page type and a one-shot HTTP adapter
//!
//! The core only consumes [`FetchResponse`] values. Hosts that fetch with
//! `reqwest` can use [`fetch_page`] to build one; no retries, scheduling or
//! rate limiting happen here.

use crate::config::UserAgentConfig;
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;

/// A page as handed over by the crawling host
#[derive(Debug, Clone, Default)]
pub struct FetchResponse {
    /// URL the response was served from (after redirects)
    pub url: String,

    /// HTTP status code; 0 when the fetch itself failed
    pub status: u16,

    /// Raw response body
    pub body: Vec<u8>,

    /// Transport error description, if the fetch failed
    pub error: Option<String>,

    /// Response headers keyed by lowercase name
    headers: HashMap<String, String>,
}

impl FetchResponse {
    /// Creates a response with no headers
    pub fn new(url: impl Into<String>, status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            url: url.into(),
            status,
            body: body.into(),
            error: None,
            headers: HashMap::new(),
        }
    }

    /// Creates a response for a fetch that never produced an HTTP status
    pub fn failed(url: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            error: Some(error.into()),
            ..Default::default()
        }
    }

    /// Adds a header (builder style)
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.insert_header(name, value);
        self
    }

    /// Adds or replaces a header
    pub fn insert_header(&mut self, name: &str, value: impl Into<String>) {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
    }

    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn content_length(&self) -> Option<&str> {
        self.header("content-length")
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }
}

/// Builds an HTTP client identifying the crawler
///
/// User agent format: `CrawlerName/Version (+ContactURL)`
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    let user_agent = format!(
        "{}/{} (+{})",
        config.crawler_name, config.crawler_version, config.contact_url
    );

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL once and converts the outcome into a [`FetchResponse`]
///
/// Transport failures are returned as a failed response rather than an
/// error, so the admission filter can attribute the rejection.
pub async fn fetch_page(client: &Client, url: &str) -> FetchResponse {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            let error = if e.is_timeout() {
                "Request timeout".to_string()
            } else if e.is_connect() {
                "Connection refused".to_string()
            } else {
                e.to_string()
            };
            tracing::debug!("Fetch of {} failed: {}", url, error);
            return FetchResponse::failed(url, error);
        }
    };

    let final_url = response.url().to_string();
    let status = response.status().as_u16();
    let headers: Vec<(String, String)> = response
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();

    let mut page = match response.bytes().await {
        Ok(body) => FetchResponse::new(final_url, status, body.to_vec()),
        Err(e) => {
            tracing::debug!("Reading body of {} failed: {}", url, e);
            let mut page = FetchResponse::failed(final_url, e.to_string());
            page.status = status;
            page
        }
    };

    for (name, value) in headers {
        page.insert_header(&name, value);
    }

    page
}
