//! Deterministic sample catalog.
//!
//! Produces the same records for the same `count` on every run, so demos and
//! tests can rely on exact output. Every category, model type, provider and
//! feature appears once `count` reaches six.

use std::collections::BTreeSet;

use chrono::DateTime;
use modelmart_core::{Category, Feature, ListingRecord, ModelType, Provider};

/// 2024-01-01T00:00:00Z
const EPOCH_SECS: i64 = 1_704_067_200;
const DAY_SECS: i64 = 86_400;

const PREFIXES: [&str; 8] = [
    "Nova", "Atlas", "Echo", "Lumen", "Quill", "Vertex", "Cipher", "Orbit",
];

/// Generate `count` sample listings.
pub fn sample_listings(count: usize) -> Vec<ListingRecord> {
    (0..count).map(sample_listing).collect()
}

#[allow(clippy::cast_precision_loss)] // indices stay far below 2^52
fn sample_listing(i: usize) -> ListingRecord {
    let category = Category::ALL[i % Category::ALL.len()];
    let model_type = ModelType::ALL[(i * 5 + 1) % ModelType::ALL.len()];
    let provider = Provider::ALL[(i + 2) % Provider::ALL.len()];

    let prefix = PREFIXES[(i / Category::ALL.len()) % PREFIXES.len()];
    let version = i / (Category::ALL.len() * PREFIXES.len()) + 1;
    let name = format!("{prefix} {} v{version}", noun(category));

    let features: BTreeSet<Feature> = Feature::ALL
        .iter()
        .enumerate()
        .filter(|(n, _)| (i + n) % 3 == 0 || (i * n) % 5 == 1)
        .map(|(_, f)| *f)
        .collect();

    let downloads = ((i as u64 * 7_919) % 25_000) + 100;
    let created_at = i64::try_from(i)
        .ok()
        .and_then(|days| DateTime::from_timestamp(EPOCH_SECS + days * DAY_SECS, 0));

    ListingRecord {
        id: format!("{}-{i:03}", prefix.to_lowercase()),
        description: format!(
            "{} {} model by {} for {} workloads",
            model_type.label(),
            noun(category).to_lowercase(),
            provider.label(),
            category.label().to_lowercase()
        ),
        name,
        category,
        model_type,
        provider,
        price: ((i * 37) % 20) as f64 / 100.0,
        rating: (35 + (i * 17) % 16) as f64 / 10.0,
        reviews: (i as u64 * 131) % 2_000,
        downloads,
        features,
        is_new: i % 4 == 0,
        is_hot: downloads > 20_000,
        created_at,
    }
}

const fn noun(category: Category) -> &'static str {
    match category {
        Category::Text => "Writer",
        Category::Image => "Canvas",
        Category::Audio => "Voice",
        Category::Video => "Motion",
        Category::Analysis => "Insight",
        Category::Translation => "Lingua",
    }
}
