//! Page-Sieve main entry point
//!
//! This is the command-line interface for inspecting the page admission and
//! link gating decisions of the crawl core.

use clap::{Parser, Subcommand};
use page_sieve::config::{load_config_with_hash, Config};
use page_sieve::crawler::{build_http_client, fetch_page, PageProcessor, PageStatus};
use page_sieve::output::{format_summary_toml, print_summary, write_summary_markdown};
use page_sieve::url::normalize_url;
use page_sieve::LinkVerdict;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Page-Sieve: page admission and crawl bookkeeping
///
/// Checks URLs against the crawl scope and trap rules, and runs fetched
/// pages through admission, link extraction and statistics.
#[derive(Parser, Debug)]
#[command(name = "page-sieve")]
#[command(version)]
#[command(about = "Page admission and crawl bookkeeping for a focused crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Normalize URLs and show the validity gate verdict for each
    Check {
        #[arg(value_name = "URL", required = true)]
        urls: Vec<String>,
    },

    /// Fetch pages once, process them, and print links and the summary
    Fetch {
        #[arg(value_name = "URL", required = true)]
        urls: Vec<String>,

        /// Write the markdown summary to this file
        #[arg(long, value_name = "FILE")]
        summary: Option<PathBuf>,

        /// Print the summary as TOML instead of text
        #[arg(long)]
        toml: bool,
    },

    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let (config, config_hash) = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    (cfg, Some(hash))
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => (Config::default(), None),
    };

    match cli.command {
        Command::Check { urls } => handle_check(&config, &urls)?,
        Command::Fetch {
            urls,
            summary,
            toml,
        } => handle_fetch(&config, &urls, summary, toml).await?,
        Command::Config => handle_config(&config, config_hash.as_deref()),
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("page_sieve=info,warn"),
            1 => EnvFilter::new("page_sieve=debug,info"),
            2 => EnvFilter::new("page_sieve=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Handles `check`: prints the normalized form and verdict of each URL
fn handle_check(config: &Config, urls: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let processor = PageProcessor::new(config)?;

    for url in urls {
        let normalized = match normalize_url(url) {
            Ok(normalized) => normalized,
            Err(e) => {
                println!("✗ {} ({})", url, e);
                continue;
            }
        };

        match processor.evaluate_link(url)? {
            LinkVerdict::Accept(_) => println!("✓ {}", normalized),
            LinkVerdict::Reject(reason) => {
                println!("✗ {} [{}] {}", normalized, reason.label(), reason)
            }
        }
    }

    Ok(())
}

/// Handles `fetch`: fetches each page once and runs it through the processor
async fn handle_fetch(
    config: &Config,
    urls: &[String],
    summary_path: Option<PathBuf>,
    as_toml: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let processor = PageProcessor::new(config)?;
    let client = build_http_client(&config.user_agent)?;

    for url in urls {
        tracing::info!("Fetching {}", url);
        let response = fetch_page(&client, url).await;
        let report = processor.inspect_page(url, &response)?;

        match &report.status {
            PageStatus::Admitted => {
                println!("=== {} ({} links) ===", report.page, report.links.len());
                for link in &report.links {
                    println!("  {}", link);
                }
                if !report.rejected.is_empty() {
                    println!("  ({} links rejected)", report.rejected.len());
                }
            }
            PageStatus::Rejected(reason) => {
                println!("=== {} rejected: {} ===", report.page, reason);
            }
        }
        println!();
    }

    let summary = processor.summary();
    if as_toml {
        print!("{}", format_summary_toml(&summary)?);
    } else {
        print_summary(&summary);
    }

    if let Some(path) = summary_path {
        write_summary_markdown(&summary, &path)?;
        println!("\n✓ Summary exported to: {}", path.display());
    }

    Ok(())
}

/// Handles `config`: prints the effective configuration
fn handle_config(config: &Config, config_hash: Option<&str>) {
    println!("=== Page-Sieve Configuration ===\n");

    if let Some(hash) = config_hash {
        println!("Config hash: {}\n", hash);
    }

    println!("Admission:");
    println!("  Success status: {}", config.admission.success_status);
    println!(
        "  Max content length: {} bytes",
        config.admission.max_content_length
    );
    println!("  Min text ratio: {}", config.admission.min_text_ratio);
    println!(
        "  Excluded content types: {}",
        config.admission.excluded_content_types.join(", ")
    );

    println!("\nTraps:");
    println!("  Window: {}s", config.traps.window_secs);
    println!(
        "  Discovery rate threshold: {}",
        config.traps.discovery_rate_threshold
    );
    println!("  Extra patterns: {}", config.traps.extra_patterns.len());

    println!("\nScope ({} domains):", config.scope.allowed_domains.len());
    for domain in &config.scope.allowed_domains {
        println!("  - {}", domain);
    }
    for path in &config.scope.allowed_paths {
        println!("  - {} (path)", path);
    }

    println!("\nStatistics:");
    println!("  Top words: {}", config.statistics.top_words);
    println!("  Stop words: {}", config.statistics.stop_words.len());

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);
    println!("  Contact URL: {}", config.user_agent.contact_url);
}
