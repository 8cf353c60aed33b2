//! Integration tests for page processing
//!
//! `processing_tests` drives the page processor with synthetic fetch
//! results; `fetch_tests` uses wiremock to exercise the reqwest adapter.

mod fetch_tests;
mod processing_tests;
