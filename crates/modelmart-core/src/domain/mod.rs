//! Core domain types.
//!
//! These types represent the pure domain model, independent of where
//! listings come from or how they are displayed.
//!
//! # Structure
//!
//! - `listing` - `ListingRecord` and its closed vocabularies
//! - `query` - `QueryState`, filters, price ranges and sort keys
//! - `page` - `PageState` and the pure `load_next_page` operation
//! - `facets` - filter option aggregation types

mod facets;
mod listing;
mod page;
mod query;

pub use facets::{FacetCount, FilterOptions, RangeValues};
pub(crate) use facets::{count_by, range_of};
pub use listing::{
    Category, Feature, ListingRecord, ListingValidationError, MAX_RATING, ModelType,
    ParseVocabularyError, Provider,
};
pub use page::{PageState, load_next_page};
pub use query::{ListingFilters, PriceRange, PriceTier, QueryState, SortKey};

#[cfg(test)]
pub(crate) use listing::tests::listing as test_listing;
