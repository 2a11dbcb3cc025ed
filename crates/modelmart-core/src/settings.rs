//! Browse settings and validation.
//!
//! Pure domain types with no infrastructure dependencies; adapters decide
//! where settings are read from.

use serde::{Deserialize, Serialize};

use crate::domain::SortKey;

/// Default number of listings per page.
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Largest page size accepted by validation.
pub const MAX_PAGE_SIZE: usize = 200;

/// Browse settings.
///
/// All fields are optional to support partial files and graceful defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct BrowseSettings {
    /// Listings appended per "load more".
    pub page_size: Option<usize>,

    /// Sort key applied when a view first mounts.
    pub default_sort: Option<SortKey>,

    /// Pages loaded eagerly when a view mounts.
    pub initial_pages: Option<usize>,
}

impl BrowseSettings {
    /// Create settings with sensible defaults.
    #[must_use]
    pub const fn with_defaults() -> Self {
        Self {
            page_size: Some(DEFAULT_PAGE_SIZE),
            default_sort: Some(SortKey::Popular),
            initial_pages: Some(1),
        }
    }

    #[must_use]
    pub fn effective_page_size(&self) -> usize {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    #[must_use]
    pub fn effective_default_sort(&self) -> SortKey {
        self.default_sort.unwrap_or_default()
    }

    #[must_use]
    pub fn effective_initial_pages(&self) -> usize {
        self.initial_pages.unwrap_or(1)
    }

    /// Overlay fields that are set in `other`.
    pub fn merge(&mut self, other: &Self) {
        if other.page_size.is_some() {
            self.page_size = other.page_size;
        }
        if other.default_sort.is_some() {
            self.default_sort = other.default_sort;
        }
        if other.initial_pages.is_some() {
            self.initial_pages = other.initial_pages;
        }
    }
}

/// Settings validation error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("Page size must be between 1 and 200, got {0}")]
    InvalidPageSize(usize),

    #[error("Initial pages must be at least 1, got {0}")]
    InvalidInitialPages(usize),
}

/// Validate settings values.
pub fn validate_settings(settings: &BrowseSettings) -> Result<(), SettingsError> {
    if let Some(size) = settings.page_size {
        if !(1..=MAX_PAGE_SIZE).contains(&size) {
            return Err(SettingsError::InvalidPageSize(size));
        }
    }
    if let Some(pages) = settings.initial_pages {
        if pages == 0 {
            return Err(SettingsError::InvalidInitialPages(pages));
        }
    }
    Ok(())
}
