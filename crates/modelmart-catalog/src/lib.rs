#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

mod config;
mod error;
mod models;
mod parsing;
mod port;
mod sample;
mod source;

// ============================================================================
// Public API
// ============================================================================

// Sources
pub use source::{FileCatalog, StaticCatalog};

// Configuration
pub use config::CatalogConfig;

// Errors
pub use error::{CatalogError, CatalogResult};

// Parsing and sample data
pub use parsing::{parse_catalog, to_catalog_json};
pub use sample::sample_listings;

// Silence unused dev-dependency warnings
#[cfg(test)]
use tempfile as _;
#[cfg(test)]
use tokio_test as _;
