//! Browse command handler.
//!
//! Loads pages through the single-flight loader, then applies the query to
//! everything loaded.

use std::sync::Arc;

use modelmart_core::{
    BrowseAction, BrowseSettings, BrowseState, ListingRecord, LoadOutcome, PageLoader, PageState,
    QueryState, validate_settings,
};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::bootstrap::CliContext;
use crate::commands::BrowseArgs;
use crate::error::CliError;
use crate::events::LogEmitter;
use crate::presentation::print_listing_table;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BrowseOutput<'a> {
    query: &'a QueryState,
    loaded: usize,
    has_more: bool,
    results: Vec<ListingRecord>,
}

/// Execute the browse command.
///
/// Ctrl-C while a page is loading stops paging and shows what was loaded
/// before it.
pub async fn execute(ctx: &CliContext, args: &BrowseArgs) -> Result<(), CliError> {
    let mut settings = ctx.settings().clone();
    settings.merge(&BrowseSettings {
        page_size: args.page_size,
        initial_pages: args.pages,
        default_sort: None,
    });
    validate_settings(&settings).map_err(|e| CliError::Arguments(e.to_string()))?;

    let query = args.to_query(settings.effective_default_sort());
    let page = load_pages(ctx, &settings).await?;

    let state = BrowseState::new(page.page_size)
        .with_query(query)
        .reduce(BrowseAction::PageLoaded(page));
    let visible = state.visible();

    if args.json {
        let output = BrowseOutput {
            query: &state.query,
            loaded: state.page.len(),
            has_more: state.page.has_more,
            results: visible,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if visible.is_empty() {
        println!(
            "No listings match ({} loaded, {} active filter(s)).",
            state.page.len(),
            state.query.active_filter_count()
        );
        return Ok(());
    }

    println!(
        "Showing {} of {} loaded listing(s), sorted by {}:\n",
        visible.len(),
        state.page.len(),
        state.query.sort_key
    );
    print_listing_table(&visible);
    if state.page.has_more {
        println!("\nMore listings available; use --pages to load more.");
    }
    Ok(())
}

async fn load_pages(ctx: &CliContext, settings: &BrowseSettings) -> Result<PageState, CliError> {
    let loader = PageLoader::new(Arc::clone(ctx.source()), settings.effective_page_size())
        .with_emitter(Arc::new(LogEmitter));

    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    let ctrl_c = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            interrupt.cancel();
        }
    });

    let result = load_until(&loader, settings.effective_initial_pages(), &cancel).await;
    ctrl_c.abort();
    result?;

    Ok(loader.snapshot())
}

async fn load_until(
    loader: &PageLoader,
    pages: usize,
    cancel: &CancellationToken,
) -> Result<(), CliError> {
    for _ in 0..pages {
        match loader.load_next_cancellable(cancel).await {
            LoadOutcome::Loaded { has_more: true, .. } => {}
            LoadOutcome::Loaded { has_more: false, .. }
            | LoadOutcome::Exhausted
            | LoadOutcome::Dropped => break,
            LoadOutcome::Cancelled => {
                tracing::warn!("Interrupted, showing pages loaded so far");
                break;
            }
            LoadOutcome::Failed(e) => return Err(e.into()),
        }
    }
    Ok(())
}
