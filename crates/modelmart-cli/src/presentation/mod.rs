//! Shared CLI presentation utilities.
//!
//! # Guidelines
//!
//! - Keep this module format-only: no domain transforms
//! - Filtering and sorting belong in `modelmart-core`

pub mod listing_display;
pub mod tables;

// Re-export commonly used items
pub use listing_display::{print_facets, print_listing_table};
pub use tables::{format_price, print_separator, truncate_string};
