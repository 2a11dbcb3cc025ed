//! Filter option aggregation for building filter controls.

use serde::{Deserialize, Serialize};

use super::listing::{Category, Feature, ModelType, Provider};

/// How many records carry one facet value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetCount<T> {
    pub value: T,
    pub count: usize,
}

/// A range of numeric values with min and max.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeValues {
    pub min: f64,
    pub max: f64,
}

/// Aggregate data about a listing collection.
///
/// Facets list every vocabulary value in declaration order, including values
/// with a zero count, so filter panels keep a stable layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub categories: Vec<FacetCount<Category>>,
    pub model_types: Vec<FacetCount<ModelType>>,
    pub providers: Vec<FacetCount<Provider>>,
    pub features: Vec<FacetCount<Feature>>,
    /// `None` when there are no records.
    pub price_range: Option<RangeValues>,
    /// `None` when there are no records.
    pub rating_range: Option<RangeValues>,
}

impl FilterOptions {
    /// Total number of records the facets were computed from.
    pub fn total(&self) -> usize {
        self.categories.iter().map(|f| f.count).sum()
    }
}

pub(crate) fn count_by<T: Copy + PartialEq>(
    values: &[T],
    mut hits: impl FnMut(T) -> usize,
) -> Vec<FacetCount<T>> {
    values
        .iter()
        .map(|&value| FacetCount {
            value,
            count: hits(value),
        })
        .collect()
}

pub(crate) fn range_of(values: impl Iterator<Item = f64>) -> Option<RangeValues> {
    values.fold(None, |acc, v| match acc {
        None => Some(RangeValues { min: v, max: v }),
        Some(r) => Some(RangeValues {
            min: r.min.min(v),
            max: r.max.max(v),
        }),
    })
}
