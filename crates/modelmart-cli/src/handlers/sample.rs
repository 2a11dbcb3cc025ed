//! Sample command handler.

use modelmart_catalog::{sample_listings, to_catalog_json};

use crate::error::CliError;

/// Render a sample catalog of `count` listings as JSON.
pub fn render(count: usize) -> Result<String, CliError> {
    Ok(to_catalog_json(&sample_listings(count))?)
}

/// Execute the sample command, writing the catalog to stdout.
pub fn execute(count: usize) -> Result<(), CliError> {
    println!("{}", render(count)?);
    Ok(())
}
