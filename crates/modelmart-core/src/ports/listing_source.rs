//! Listing source port.
//!
//! The engine does not care how listings are produced: a static catalog, a
//! sample generator or a remote marketplace service all sit behind this
//! trait. Implementations live in adapter crates.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::ListingRecord;

/// Errors from listing source operations.
///
/// Implementation-specific errors (I/O, JSON, HTTP) are mapped to these at
/// the adapter boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// The source could not be reached or refused the request.
    #[error("Listing source unavailable: {message}")]
    Unavailable {
        /// Description of the failure
        message: String,
    },

    /// The source answered with data that does not fit the listing schema.
    #[error("Invalid listing data: {message}")]
    InvalidData {
        /// What was invalid
        message: String,
    },

    /// The source did not answer in time.
    #[error("Listing source timed out")]
    Timeout,
}

/// Result type alias for listing source operations.
pub type SourceResult<T> = Result<T, SourceError>;

/// A window into the source collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub offset: usize,
    pub limit: usize,
}

impl PageRequest {
    pub const fn new(offset: usize, limit: usize) -> Self {
        Self { offset, limit }
    }
}

/// One fetched window plus the source's current total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourcePage {
    /// At most `limit` records starting at `offset`, in source order.
    pub records: Vec<ListingRecord>,
    /// Total number of records the source knows about.
    pub total: usize,
}

/// Port trait for listing suppliers.
///
/// # Design
///
/// - Returns core-owned `ListingRecord`s only
/// - Returns `SourceError` for all failures
/// - Async so network-backed sources fit behind the same interface
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingSourcePort: Send + Sync {
    /// Fetch up to `request.limit` records starting at `request.offset`.
    ///
    /// An offset past the end yields an empty page, not an error.
    async fn fetch_page(&self, request: PageRequest) -> SourceResult<SourcePage>;

    /// Number of records currently available.
    async fn total_count(&self) -> SourceResult<usize>;
}
