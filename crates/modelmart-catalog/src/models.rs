//! Wire types for catalog files.
//!
//! Vocabulary fields are kept as strings here so that a bad value can be
//! reported with the entry's position instead of a generic serde error.

use serde::Deserialize;

/// One entry of a catalog JSON array.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    pub model_type: String,
    pub provider: String,
    pub price: f64,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub reviews: u64,
    #[serde(default)]
    pub downloads: u64,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub is_hot: bool,
    /// RFC 3339 timestamp.
    #[serde(default)]
    pub created_at: Option<String>,
}
