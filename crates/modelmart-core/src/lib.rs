#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod browse;
pub mod domain;
pub mod engine;
pub mod events;
pub mod ports;
pub mod services;
pub mod settings;

// Re-export commonly used types for convenience
pub use browse::{BrowseAction, BrowseState};
pub use domain::{
    Category, FacetCount, Feature, FilterOptions, ListingFilters, ListingRecord,
    ListingValidationError, MAX_RATING, ModelType, PageState, ParseVocabularyError, PriceRange,
    PriceTier, Provider, QueryState, RangeValues, SortKey, load_next_page,
};
pub use engine::{compare, filter_and_sort, filter_options, matches};
pub use events::BrowseEvent;
pub use ports::{
    BrowseEventEmitter, CoreError, ListingSourcePort, NoopBrowseEmitter, PageRequest, SourceError,
    SourcePage, SourceResult,
};
pub use services::{LoadOutcome, LoadPhase, PageLoader};
pub use settings::{
    BrowseSettings, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, SettingsError, validate_settings,
};

// Dev-dependencies only used from unit tests or integration tests
#[cfg(test)]
use serde_json as _;
#[cfg(test)]
use tokio_test as _;
