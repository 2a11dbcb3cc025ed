//! Incremental page accumulation.
//!
//! [`PageState`] is an immutable-by-convention value: every operation takes a
//! reference and returns the next state, leaving the caller to replace the
//! old one.
//!
//! # Invariants
//!
//! - `loaded_records` never contains two records with the same `id`.
//! - `has_more` is false once `loaded_records.len() >= total_known`, or once
//!   the source ran out of records before the known total was reached.
//! - `current_page_index * page_size` never exceeds `loaded_records.len()`
//!   by more than `page_size - 1` (for duplicate-free sources).

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::listing::ListingRecord;

/// Records loaded so far, in load order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageState {
    pub loaded_records: Vec<ListingRecord>,
    pub page_size: usize,
    pub has_more: bool,
    pub current_page_index: usize,
}

impl PageState {
    /// Empty state for a freshly mounted view. A zero page size is coerced
    /// to 1.
    pub fn new(page_size: usize) -> Self {
        Self {
            loaded_records: Vec::new(),
            page_size: page_size.max(1),
            has_more: true,
            current_page_index: 0,
        }
    }

    /// Source offset of the next page.
    pub const fn next_offset(&self) -> usize {
        self.current_page_index * self.page_size
    }

    /// Number of records the next page should bring in.
    pub fn next_page_len(&self, total_known: usize) -> usize {
        self.page_size
            .min(total_known.saturating_sub(self.loaded_records.len()))
    }

    pub fn len(&self) -> usize {
        self.loaded_records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loaded_records.is_empty()
    }

    /// Merge one fetched page into the state.
    ///
    /// Records whose `id` is already loaded are skipped. `exhausted` signals
    /// that the source delivered fewer records than requested.
    #[must_use]
    pub fn apply_batch<I>(&self, batch: I, total_known: usize, exhausted: bool) -> Self
    where
        I: IntoIterator<Item = ListingRecord>,
    {
        let mut seen: HashSet<String> = self
            .loaded_records
            .iter()
            .map(|r| r.id.clone())
            .collect();

        let mut loaded_records = self.loaded_records.clone();
        for record in batch {
            if seen.insert(record.id.clone()) {
                loaded_records.push(record);
            } else {
                tracing::debug!(id = %record.id, "Skipping duplicate listing");
            }
        }

        let has_more = !exhausted && loaded_records.len() < total_known;

        Self {
            loaded_records,
            page_size: self.page_size,
            has_more,
            current_page_index: self.current_page_index + 1,
        }
    }
}

/// Load the next page from a fully resident source.
///
/// Takes `min(page_size, total_known - loaded)` records starting at
/// `current_page_index * page_size`. When the source holds fewer records than
/// needed, whatever is available is appended and `has_more` becomes false.
/// A state that already has no more pages is returned unchanged.
#[must_use]
pub fn load_next_page(page: &PageState, source: &[ListingRecord], total_known: usize) -> PageState {
    if !page.has_more {
        return page.clone();
    }

    let wanted = page.next_page_len(total_known);
    let offset = page.next_offset();
    let available = source.len().saturating_sub(offset);
    let take = wanted.min(available);

    let batch = source.iter().skip(offset).take(take).cloned();
    page.apply_batch(batch, total_known, available < wanted)
}
