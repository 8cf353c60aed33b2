//! Configuration module for Page-Sieve
//!
//! Admission thresholds, trap tuning, crawl scope and statistics settings are
//! loaded from a TOML file. Every key is optional; missing keys keep the
//! reference defaults.
//!
//! # Example
//!
//! ```no_run
//! use page_sieve::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("sieve.toml")).unwrap();
//! println!("Minimum text ratio: {}", config.admission.min_text_ratio);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    AdmissionConfig, Config, ScopeConfig, StatisticsConfig, TrapConfig, UserAgentConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
