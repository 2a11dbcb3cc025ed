//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core expects from infrastructure.
//! They contain no implementation details and use only domain types.

pub mod event_emitter;
pub mod listing_source;

use thiserror::Error;

pub use event_emitter::{BrowseEventEmitter, NoopBrowseEmitter};
pub use listing_source::{ListingSourcePort, PageRequest, SourceError, SourcePage, SourceResult};

#[cfg(test)]
pub use listing_source::MockListingSourcePort;

/// Core error type for semantic domain errors.
///
/// Adapters should map this to their own error types (CLI exit codes,
/// serialized UI errors).
#[derive(Debug, Error)]
pub enum CoreError {
    /// Listing source operation failed.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Settings validation error.
    #[error(transparent)]
    Settings(#[from] crate::settings::SettingsError),

    /// A listing record broke a schema invariant.
    #[error(transparent)]
    Listing(#[from] crate::domain::ListingValidationError),

    /// Validation error (invalid input).
    #[error("Validation error: {0}")]
    Validation(String),
}
