//! Query types: search text, filter dimensions and sort key.
//!
//! A [`QueryState`] fully determines the output of
//! [`filter_and_sort`](crate::engine::filter_and_sort) for a fixed input
//! collection. Missing or empty dimensions impose no constraint.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::listing::{Category, Feature, ModelType, ParseVocabularyError, Provider};

// ============================================================================
// Price range
// ============================================================================

/// Inclusive price bounds. `max = None` is open-ended.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: Option<f64>,
}

impl PriceRange {
    pub const fn new(min: f64, max: Option<f64>) -> Self {
        Self { min, max }
    }

    /// Range with only a lower bound.
    pub const fn at_least(min: f64) -> Self {
        Self { min, max: None }
    }

    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && self.max.is_none_or(|max| price <= max)
    }
}

/// Named price buckets offered by the browse view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PriceTier {
    Budget,
    Standard,
    Professional,
    /// Open-ended top tier.
    Premium,
}

impl PriceTier {
    pub const ALL: [Self; 4] = [
        Self::Budget,
        Self::Standard,
        Self::Professional,
        Self::Premium,
    ];

    pub const fn range(self) -> PriceRange {
        match self {
            Self::Budget => PriceRange::new(0.0, Some(0.01)),
            Self::Standard => PriceRange::new(0.01, Some(0.05)),
            Self::Professional => PriceRange::new(0.05, Some(0.1)),
            Self::Premium => PriceRange::at_least(0.1),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Budget => "budget",
            Self::Standard => "standard",
            Self::Professional => "professional",
            Self::Premium => "premium",
        }
    }
}

impl FromStr for PriceTier {
    type Err = ParseVocabularyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| ParseVocabularyError {
                kind: "price tier",
                value: s.to_string(),
            })
    }
}

// ============================================================================
// Sort key
// ============================================================================

/// Output ordering. Every key breaks ties by ascending `id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Descending downloads.
    #[default]
    Popular,
    /// `is_new` first, then most recent `created_at`.
    Newest,
    /// Descending rating.
    Rating,
    /// Ascending price.
    PriceLow,
    /// Descending price.
    PriceHigh,
    /// Ascending name.
    Name,
}

impl SortKey {
    pub const ALL: [Self; 6] = [
        Self::Popular,
        Self::Newest,
        Self::Rating,
        Self::PriceLow,
        Self::PriceHigh,
        Self::Name,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Popular => "popular",
            Self::Newest => "newest",
            Self::Rating => "rating",
            Self::PriceLow => "price-low",
            Self::PriceHigh => "price-high",
            Self::Name => "name",
        }
    }

    /// Parse a sort key, falling back to [`SortKey::Popular`] for anything
    /// unrecognised.
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or_else(|_| {
            tracing::debug!(sort = s, "Unknown sort key, using popular");
            Self::Popular
        })
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = ParseVocabularyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == wanted)
            .ok_or_else(|| ParseVocabularyError {
                kind: "sort key",
                value: s.to_string(),
            })
    }
}

// ============================================================================
// Filters
// ============================================================================

/// Filter dimensions.
///
/// Multi-valued dimensions use OR within the dimension and AND across
/// dimensions. An empty set is "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListingFilters {
    pub categories: BTreeSet<Category>,
    pub model_types: BTreeSet<ModelType>,
    pub providers: BTreeSet<Provider>,
    /// Matches records sharing at least one tag.
    pub features: BTreeSet<Feature>,
    pub price_range: Option<PriceRange>,
    pub min_rating: Option<f64>,
}

impl ListingFilters {
    /// Number of dimensions currently constraining the result.
    pub fn active_count(&self) -> usize {
        [
            !self.categories.is_empty(),
            !self.model_types.is_empty(),
            !self.providers.is_empty(),
            !self.features.is_empty(),
            self.price_range.is_some(),
            self.min_rating.is_some(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }
}

// ============================================================================
// Query state
// ============================================================================

/// Complete view request: search text, filters and sort key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QueryState {
    pub search_text: String,
    pub filters: ListingFilters,
    pub sort_key: SortKey,
}

impl QueryState {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    #[must_use]
    pub const fn with_sort(mut self, key: SortKey) -> Self {
        self.sort_key = key;
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: Category) -> Self {
        self.filters.categories.insert(category);
        self
    }

    #[must_use]
    pub fn with_model_type(mut self, model_type: ModelType) -> Self {
        self.filters.model_types.insert(model_type);
        self
    }

    #[must_use]
    pub fn with_provider(mut self, provider: Provider) -> Self {
        self.filters.providers.insert(provider);
        self
    }

    #[must_use]
    pub fn with_feature(mut self, feature: Feature) -> Self {
        self.filters.features.insert(feature);
        self
    }

    #[must_use]
    pub const fn with_price_range(mut self, range: PriceRange) -> Self {
        self.filters.price_range = Some(range);
        self
    }

    /// `rating` should be finite; a NaN bound matches every record.
    #[must_use]
    pub const fn with_min_rating(mut self, rating: f64) -> Self {
        self.filters.min_rating = Some(rating);
        self
    }

    /// Count of active constraints, search text included.
    pub fn active_filter_count(&self) -> usize {
        let search = usize::from(!self.search_text.trim().is_empty());
        search + self.filters.active_count()
    }

    /// Build a query from loosely-typed key/value pairs.
    ///
    /// Recognised keys: `search`, `category`, `modelType`, `provider`,
    /// `feature`, `minPrice`, `maxPrice`, `priceTier`, `minRating`, `sort`.
    /// Repeated multi-valued keys accumulate. Unknown keys and values that do
    /// not parse are skipped; a query never fails to build.
    pub fn from_params<'a, I>(params: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut query = Self::default();
        let mut min_price: Option<f64> = None;
        let mut max_price: Option<f64> = None;
        let mut tier: Option<PriceTier> = None;

        for (key, value) in params {
            match key {
                "search" | "q" => query.search_text = value.to_string(),
                "category" => insert_parsed(&mut query.filters.categories, key, value),
                "modelType" | "model_type" => {
                    insert_parsed(&mut query.filters.model_types, key, value);
                }
                "provider" => insert_parsed(&mut query.filters.providers, key, value),
                "feature" | "features" => insert_parsed(&mut query.filters.features, key, value),
                "minPrice" | "min_price" => min_price = parse_number(key, value).or(min_price),
                "maxPrice" | "max_price" => max_price = parse_number(key, value).or(max_price),
                "priceTier" | "price_tier" => match value.parse() {
                    Ok(t) => tier = Some(t),
                    Err(e) => tracing::debug!(key, error = %e, "Ignoring query parameter"),
                },
                "minRating" | "min_rating" => {
                    query.filters.min_rating = parse_number(key, value).or(query.filters.min_rating);
                }
                "sort" | "sortKey" => query.sort_key = SortKey::parse_lenient(value),
                other => tracing::debug!(key = other, "Ignoring unrecognised filter dimension"),
            }
        }

        // Explicit bounds take precedence over a named tier.
        query.filters.price_range = match (min_price, max_price) {
            (None, None) => tier.map(PriceTier::range),
            (min, max) => Some(PriceRange::new(min.unwrap_or(0.0), max)),
        };

        query
    }
}

fn insert_parsed<T>(set: &mut BTreeSet<T>, key: &str, value: &str)
where
    T: FromStr<Err = ParseVocabularyError> + Ord,
{
    for part in value.split(',').filter(|p| !p.trim().is_empty()) {
        match part.parse() {
            Ok(v) => {
                set.insert(v);
            }
            Err(e) => tracing::debug!(key, error = %e, "Ignoring query parameter value"),
        }
    }
}

fn parse_number(key: &str, value: &str) -> Option<f64> {
    match value.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => Some(n),
        _ => {
            tracing::debug!(key, value, "Ignoring non-numeric query parameter");
            None
        }
    }
}
