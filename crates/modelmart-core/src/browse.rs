//! Reducer-style browse state.
//!
//! A view owns one [`BrowseState`] and replaces it with
//! `state.reduce(action)` on every user interaction. Nothing here mutates in
//! place, so a previous state can be kept for comparison or undo.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::{
    Category, Feature, ListingFilters, ListingRecord, ModelType, PageState, PriceRange, PriceTier,
    Provider, QueryState, SortKey,
};
use crate::engine::filter_and_sort;

/// A user interaction that changes the browse view.
#[derive(Debug, Clone, PartialEq)]
pub enum BrowseAction {
    SetSearch(String),
    ToggleCategory(Category),
    ToggleModelType(ModelType),
    ToggleProvider(Provider),
    ToggleFeature(Feature),
    /// `None` clears the price constraint.
    SetPriceRange(Option<PriceRange>),
    SetPriceTier(Option<PriceTier>),
    SetMinRating(Option<f64>),
    SetSort(SortKey),
    /// Drop every filter and the search text. The sort key is kept.
    ClearFilters,
    /// Replace the page state with one produced by a loader.
    PageLoaded(PageState),
    /// Start paging over (e.g. the source changed).
    ResetPaging,
}

/// Query plus loaded pages for one view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseState {
    pub query: QueryState,
    pub page: PageState,
}

impl BrowseState {
    pub fn new(page_size: usize) -> Self {
        Self {
            query: QueryState::default(),
            page: PageState::new(page_size),
        }
    }

    #[must_use]
    pub fn with_query(mut self, query: QueryState) -> Self {
        self.query = query;
        self
    }

    /// Apply one action and return the next state.
    #[must_use]
    pub fn reduce(self, action: BrowseAction) -> Self {
        let Self { mut query, mut page } = self;

        match action {
            BrowseAction::SetSearch(text) => query.search_text = text,
            BrowseAction::ToggleCategory(c) => toggle(&mut query.filters.categories, c),
            BrowseAction::ToggleModelType(t) => toggle(&mut query.filters.model_types, t),
            BrowseAction::ToggleProvider(p) => toggle(&mut query.filters.providers, p),
            BrowseAction::ToggleFeature(f) => toggle(&mut query.filters.features, f),
            BrowseAction::SetPriceRange(range) => query.filters.price_range = range,
            BrowseAction::SetPriceTier(tier) => {
                query.filters.price_range = tier.map(PriceTier::range);
            }
            BrowseAction::SetMinRating(rating) => query.filters.min_rating = rating,
            BrowseAction::SetSort(key) => query.sort_key = key,
            BrowseAction::ClearFilters => {
                query.search_text.clear();
                query.filters = ListingFilters::default();
            }
            BrowseAction::PageLoaded(next) => page = next,
            BrowseAction::ResetPaging => page = PageState::new(page.page_size),
        }

        Self { query, page }
    }

    /// Loaded records that pass the current query, in query order.
    pub fn visible(&self) -> Vec<ListingRecord> {
        filter_and_sort(&self.page.loaded_records, &self.query)
    }
}

fn toggle<T: Ord>(set: &mut BTreeSet<T>, value: T) {
    if set.contains(&value) {
        set.remove(&value);
    } else {
        set.insert(value);
    }
}
