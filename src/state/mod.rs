//! Crawl bookkeeping state
//!
//! - `SeenRegistry`: last visit time of every admitted page
//! - `DomainDiscoveryWindow`: recent discovery timestamps per domain

mod discovery;
mod seen;

pub use discovery::DomainDiscoveryWindow;
pub use seen::{SeenRegistry, Visit};
