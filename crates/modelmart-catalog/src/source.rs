//! Catalog sources: an in-memory catalog and a lazily loaded JSON file.

use std::path::{Path, PathBuf};

use modelmart_core::{ListingRecord, PageRequest, SourcePage};
use tokio::sync::OnceCell;

use crate::config::CatalogConfig;
use crate::error::{CatalogError, CatalogResult};
use crate::parsing::{check_unique_ids, parse_catalog};
use crate::sample::sample_listings;

// ============================================================================
// Static catalog
// ============================================================================

/// A fully resident, validated listing collection.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    records: Vec<ListingRecord>,
    pub(crate) config: CatalogConfig,
}

impl StaticCatalog {
    /// Build a catalog from records, validating each one and rejecting
    /// duplicate ids.
    pub fn from_records(records: Vec<ListingRecord>) -> CatalogResult<Self> {
        for record in &records {
            record.validate()?;
        }
        check_unique_ids(&records)?;
        Ok(Self {
            records,
            config: CatalogConfig::default(),
        })
    }

    /// Parse a catalog from a JSON array.
    pub fn from_json_str(json: &str) -> CatalogResult<Self> {
        Ok(Self {
            records: parse_catalog(json)?,
            config: CatalogConfig::default(),
        })
    }

    /// Read and parse a catalog file.
    pub fn from_path(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json_str(&json)?;
        tracing::info!(path = %path.display(), count = catalog.len(), "Loaded catalog");
        Ok(catalog)
    }

    /// Deterministic sample catalog of `count` listings.
    pub fn sample(count: usize) -> Self {
        Self {
            records: sample_listings(count),
            config: CatalogConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: CatalogConfig) -> Self {
        self.config = config;
        self
    }

    pub fn records(&self) -> &[ListingRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Slice one page. An offset past the end gives an empty page.
    pub fn page(&self, request: PageRequest) -> SourcePage {
        let limit = self.config.clamp_limit(request.limit);
        SourcePage {
            records: self
                .records
                .iter()
                .skip(request.offset)
                .take(limit)
                .cloned()
                .collect(),
            total: self.records.len(),
        }
    }
}

// ============================================================================
// File catalog
// ============================================================================

/// A JSON catalog file read on first use.
///
/// A failed read is not cached; the next fetch tries again.
#[derive(Debug)]
pub struct FileCatalog {
    path: PathBuf,
    pub(crate) config: CatalogConfig,
    loaded: OnceCell<StaticCatalog>,
}

impl FileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            config: CatalogConfig::default(),
            loaded: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: CatalogConfig) -> Self {
        self.config = config;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The parsed catalog, reading the file if needed.
    pub async fn load(&self) -> CatalogResult<&StaticCatalog> {
        self.loaded
            .get_or_try_init(|| async {
                let json = tokio::fs::read_to_string(&self.path)
                    .await
                    .map_err(|source| CatalogError::Io {
                        path: self.path.clone(),
                        source,
                    })?;
                let catalog =
                    StaticCatalog::from_json_str(&json)?.with_config(self.config.clone());
                tracing::info!(
                    path = %self.path.display(),
                    count = catalog.len(),
                    "Loaded catalog file"
                );
                Ok::<_, CatalogError>(catalog)
            })
            .await
    }
}
