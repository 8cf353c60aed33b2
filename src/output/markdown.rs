//! Markdown summary generation
//!
//! Renders the end-of-crawl report: unique pages, the longest page, the
//! most frequent words and the per-subdomain page counts.

use crate::stats::Summary;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes the markdown summary to a file
///
/// # Arguments
///
/// * `summary` - The crawl summary
/// * `output_path` - Path where the markdown file should be written
pub fn write_summary_markdown(summary: &Summary, output_path: &Path) -> std::io::Result<()> {
    let markdown = format_summary_markdown(summary);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a crawl summary as markdown
pub fn format_summary_markdown(summary: &Summary) -> String {
    let mut md = String::new();

    md.push_str("# Page-Sieve Crawl Summary\n\n");

    md.push_str("## Overall Statistics\n\n");
    md.push_str(&format!("- **Unique Pages**: {}\n", summary.unique_pages));
    match &summary.longest_page {
        Some(longest) => md.push_str(&format!(
            "- **Longest Page**: {} ({} words)\n\n",
            longest.url, longest.token_count
        )),
        None => md.push_str("- **Longest Page**: none\n\n"),
    }

    if !summary.top_words.is_empty() {
        md.push_str(&format!("## Top {} Words\n\n", summary.top_words.len()));
        md.push_str("| Rank | Word | Count |\n");
        md.push_str("|------|------|-------|\n");

        for (rank, (word, count)) in summary.top_words.iter().enumerate() {
            md.push_str(&format!("| {} | {} | {} |\n", rank + 1, word, count));
        }
        md.push('\n');
    }

    if !summary.subdomains.is_empty() {
        md.push_str("## Subdomains\n\n");
        md.push_str("| Subdomain | Unique Pages |\n");
        md.push_str("|-----------|--------------|\n");

        for (label, count) in &summary.subdomains {
            md.push_str(&format!("| {} | {} |\n", label, count));
        }
        md.push('\n');
    }

    md
}
