//! Facets command handler.

use std::sync::Arc;

use modelmart_core::{MAX_PAGE_SIZE, PageLoader, filter_options};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::print_facets;

/// Execute the facets command.
///
/// Loads the whole catalog and prints counts per vocabulary value plus the
/// price and rating ranges.
pub async fn execute(ctx: &CliContext, json: bool) -> Result<(), CliError> {
    let loader = PageLoader::new(Arc::clone(ctx.source()), MAX_PAGE_SIZE);
    loader.load_pages(usize::MAX).await?;

    let options = filter_options(&loader.snapshot().loaded_records);

    if json {
        println!("{}", serde_json::to_string_pretty(&options)?);
    } else {
        print_facets(&options);
    }
    Ok(())
}
