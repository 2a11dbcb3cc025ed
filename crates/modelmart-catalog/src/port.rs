//! Port trait implementations for the catalog sources.
//!
//! Internal `CatalogError`s are converted to the core `SourceError` here.

use async_trait::async_trait;
use modelmart_core::{ListingSourcePort, PageRequest, SourceError, SourcePage, SourceResult};

use crate::config::CatalogConfig;
use crate::error::CatalogError;
use crate::source::{FileCatalog, StaticCatalog};

// ============================================================================
// Error Mapping
// ============================================================================

/// Convert internal `CatalogError` to core `SourceError`.
fn map_error(err: CatalogError) -> SourceError {
    match err {
        CatalogError::Io { .. } => SourceError::Unavailable {
            message: err.to_string(),
        },
        CatalogError::JsonParse(_)
        | CatalogError::InvalidEntry { .. }
        | CatalogError::DuplicateId { .. }
        | CatalogError::InvalidListing(_) => SourceError::InvalidData {
            message: err.to_string(),
        },
    }
}

async fn simulate_latency(config: &CatalogConfig) {
    if let Some(latency) = config.latency {
        tokio::time::sleep(latency).await;
    }
}

// ============================================================================
// Port Implementation
// ============================================================================

#[async_trait]
impl ListingSourcePort for StaticCatalog {
    async fn fetch_page(&self, request: PageRequest) -> SourceResult<SourcePage> {
        simulate_latency(&self.config).await;
        let page = self.page(request);
        tracing::debug!(
            offset = request.offset,
            returned = page.records.len(),
            total = page.total,
            "Served catalog page"
        );
        Ok(page)
    }

    async fn total_count(&self) -> SourceResult<usize> {
        Ok(self.len())
    }
}

#[async_trait]
impl ListingSourcePort for FileCatalog {
    async fn fetch_page(&self, request: PageRequest) -> SourceResult<SourcePage> {
        simulate_latency(&self.config).await;
        let catalog = self.load().await.map_err(map_error)?;
        Ok(catalog.page(request))
    }

    async fn total_count(&self) -> SourceResult<usize> {
        Ok(self.load().await.map_err(map_error)?.len())
    }
}
