//! Catalog parsing: wire entries to validated listing records.

use std::collections::{BTreeSet, HashSet};

use chrono::{DateTime, Utc};
use modelmart_core::{Feature, ListingRecord};

use crate::error::{CatalogError, CatalogResult};
use crate::models::CatalogEntry;

/// Parse a catalog JSON array into records, in file order.
///
/// Fails on the first entry with an unknown category, model type or provider,
/// on a record that breaks a listing invariant, and on duplicate ids. Unknown
/// feature tags are dropped with a warning.
pub fn parse_catalog(json: &str) -> CatalogResult<Vec<ListingRecord>> {
    let entries: Vec<CatalogEntry> = serde_json::from_str(json)?;
    let records = entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| parse_entry(index, entry))
        .collect::<CatalogResult<Vec<_>>>()?;

    check_unique_ids(&records)?;
    tracing::debug!(count = records.len(), "Parsed catalog");
    Ok(records)
}

/// Serialize records in the format `parse_catalog` reads.
pub fn to_catalog_json(records: &[ListingRecord]) -> CatalogResult<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Reject a record set containing the same id twice.
pub fn check_unique_ids(records: &[ListingRecord]) -> CatalogResult<()> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        if !seen.insert(record.id.as_str()) {
            return Err(CatalogError::DuplicateId {
                id: record.id.clone(),
            });
        }
    }
    Ok(())
}

fn parse_entry(index: usize, entry: CatalogEntry) -> CatalogResult<ListingRecord> {
    let invalid = |message: String| CatalogError::InvalidEntry { index, message };

    let category = entry.category.parse().map_err(|e| invalid(format!("{e}")))?;
    let model_type = entry.model_type.parse().map_err(|e| invalid(format!("{e}")))?;
    let provider = entry.provider.parse().map_err(|e| invalid(format!("{e}")))?;
    let created_at = entry
        .created_at
        .as_deref()
        .map(|raw| {
            DateTime::parse_from_rfc3339(raw)
                .map(|t| t.with_timezone(&Utc))
                .map_err(|e| invalid(format!("Invalid createdAt '{raw}': {e}")))
        })
        .transpose()?;

    let features = parse_features(&entry.id, &entry.features);

    let record = ListingRecord {
        id: entry.id,
        name: entry.name,
        description: entry.description,
        category,
        model_type,
        provider,
        price: entry.price,
        rating: entry.rating,
        reviews: entry.reviews,
        downloads: entry.downloads,
        features,
        is_new: entry.is_new,
        is_hot: entry.is_hot,
        created_at,
    };
    record.validate()?;
    Ok(record)
}

fn parse_features(id: &str, raw: &[String]) -> BTreeSet<Feature> {
    raw.iter()
        .filter_map(|tag| match tag.parse() {
            Ok(feature) => Some(feature),
            Err(e) => {
                tracing::warn!(id, error = %e, "Skipping unknown feature tag");
                None
            }
        })
        .collect()
}
