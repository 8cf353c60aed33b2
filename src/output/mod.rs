//! Output module for rendering crawl summaries
//!
//! This module handles:
//! - Generating markdown summaries of crawl results
//! - Exporting the summary as TOML
//! - Printing the summary to the console

mod markdown;

pub use markdown::{format_summary_markdown, write_summary_markdown};

use crate::stats::Summary;

/// Serializes a summary as TOML
pub fn format_summary_toml(summary: &Summary) -> Result<String, toml::ser::Error> {
    toml::to_string(summary)
}

/// Prints a summary to stdout
pub fn print_summary(summary: &Summary) {
    println!("=== Crawl Summary ===\n");

    println!("Overview:");
    println!("  Unique pages: {}", summary.unique_pages);
    match &summary.longest_page {
        Some(longest) => println!(
            "  Longest page: {} ({} words)",
            longest.url, longest.token_count
        ),
        None => println!("  Longest page: none"),
    }
    println!();

    if !summary.top_words.is_empty() {
        println!("Top {} words:", summary.top_words.len());
        for (rank, (word, count)) in summary.top_words.iter().enumerate() {
            println!("  {:>2}. {} ({})", rank + 1, word, count);
        }
        println!();
    }

    if !summary.subdomains.is_empty() {
        println!("Subdomains ({}):", summary.subdomains.len());
        for (label, count) in &summary.subdomains {
            println!("  {}, {}", label, count);
        }
    }
}
