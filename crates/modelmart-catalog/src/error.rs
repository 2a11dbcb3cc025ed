//! Internal error types for catalog operations.
//!
//! These errors are internal to `modelmart-catalog` and are mapped to the core
//! `SourceError` at the port boundary.

use std::path::PathBuf;

use modelmart_core::ListingValidationError;
use thiserror::Error;

/// Result type alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors raised while loading or parsing a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("Failed to read catalog {}: {source}", .path.display())]
    Io {
        /// File that was being read
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The catalog is not valid JSON or has the wrong shape.
    #[error("Catalog JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// An entry names a value outside the listing vocabularies.
    #[error("Invalid catalog entry #{index}: {message}")]
    InvalidEntry {
        /// Position of the entry in the catalog array
        index: usize,
        /// What was wrong with it
        message: String,
    },

    /// Two entries share an id.
    #[error("Duplicate listing id '{id}' in catalog")]
    DuplicateId {
        /// The repeated id
        id: String,
    },

    /// An entry parsed but broke a record invariant.
    #[error(transparent)]
    InvalidListing(#[from] ListingValidationError),
}
