//! Listing query engine: search, filter and sort over a record collection.
//!
//! Everything here is pure and synchronous. Callers are expected to run it on
//! every query change; debouncing belongs at the UI boundary.
//!
//! # Pipeline
//!
//! 1. Search: case-insensitive substring of `name`, `description` or the
//!    provider label.
//! 2. Multi-valued filters (category, model type, provider, features): OR
//!    within a dimension, empty set means no constraint.
//! 3. Price range (inclusive, optionally open-ended) and minimum rating.
//! 4. All constraints AND together.
//! 5. Sort by the query's key, ties broken by ascending `id`.
//!
//! Search text is used exactly as given; trimming is the caller's job.
//! Names are ordered with the Unicode root collation at tertiary strength:
//! letters compare alphabetically regardless of case, and case only decides
//! between otherwise equal names (lowercase first).

use std::cmp::Ordering;

use icu_collator::{Collator, CollatorOptions};

use crate::domain::{
    Category, Feature, FilterOptions, ListingFilters, ListingRecord, ModelType, Provider,
    QueryState, SortKey, count_by, range_of,
};

/// Filter and sort `records` according to `query`.
///
/// Never mutates the input; the result is a new vector. Output order is fully
/// determined by the query and the record values, not by input order.
pub fn filter_and_sort(records: &[ListingRecord], query: &QueryState) -> Vec<ListingRecord> {
    let needle = query.search_text.to_lowercase();

    let mut results: Vec<ListingRecord> = records
        .iter()
        .filter(|r| matches_search(r, &needle) && matches_filters(r, &query.filters))
        .cloned()
        .collect();

    results.sort_by(|a, b| compare(a, b, query.sort_key));

    tracing::trace!(
        input = records.len(),
        output = results.len(),
        sort = %query.sort_key,
        "Filtered listings"
    );

    results
}

/// Whether a single record satisfies every active constraint of `query`.
pub fn matches(record: &ListingRecord, query: &QueryState) -> bool {
    let needle = query.search_text.to_lowercase();
    matches_search(record, &needle) && matches_filters(record, &query.filters)
}

/// `needle` must already be lowercased. Whitespace is significant.
fn matches_search(record: &ListingRecord, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    record.name.to_lowercase().contains(needle)
        || record.description.to_lowercase().contains(needle)
        || record.provider.label().to_lowercase().contains(needle)
}

fn matches_filters(record: &ListingRecord, filters: &ListingFilters) -> bool {
    if !filters.categories.is_empty() && !filters.categories.contains(&record.category) {
        return false;
    }
    if !filters.model_types.is_empty() && !filters.model_types.contains(&record.model_type) {
        return false;
    }
    if !filters.providers.is_empty() && !filters.providers.contains(&record.provider) {
        return false;
    }
    if !filters.features.is_empty() && !record.has_any_feature(&filters.features) {
        return false;
    }
    if let Some(range) = filters.price_range {
        if !range.contains(record.price) {
            return false;
        }
    }
    if let Some(min_rating) = filters.min_rating {
        if record.rating < min_rating {
            return false;
        }
    }
    true
}

/// Total order used for `sort_key`. Always ends with an ascending `id`
/// comparison, so equal keys order deterministically.
pub fn compare(a: &ListingRecord, b: &ListingRecord, sort_key: SortKey) -> Ordering {
    let primary = match sort_key {
        SortKey::Popular => b.downloads.cmp(&a.downloads),
        SortKey::Newest => b
            .is_new
            .cmp(&a.is_new)
            // Records with a timestamp come before records without one.
            .then_with(|| match (a.created_at, b.created_at) {
                (Some(x), Some(y)) => y.cmp(&x),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }),
        SortKey::Rating => b.rating.total_cmp(&a.rating),
        SortKey::PriceLow => a.price.total_cmp(&b.price),
        SortKey::PriceHigh => b.price.total_cmp(&a.price),
        SortKey::Name => compare_names(&a.name, &b.name),
    };
    primary.then_with(|| a.id.cmp(&b.id))
}

thread_local! {
    static NAME_COLLATOR: Option<Collator> =
        Collator::try_new(&Default::default(), CollatorOptions::new())
            .map_err(|e| {
                tracing::warn!(error = ?e, "Name collator unavailable, using case-folded order");
            })
            .ok();
}

/// Case-sensitive, locale-aware name order.
fn compare_names(a: &str, b: &str) -> Ordering {
    NAME_COLLATOR
        .with(|collator| match collator {
            Some(collator) => collator.compare(a, b),
            None => a.to_lowercase().cmp(&b.to_lowercase()),
        })
        .then_with(|| a.cmp(b))
}

/// Aggregate facet counts and numeric ranges over `records`.
pub fn filter_options(records: &[ListingRecord]) -> FilterOptions {
    FilterOptions {
        categories: count_by(&Category::ALL, |c| {
            records.iter().filter(|r| r.category == c).count()
        }),
        model_types: count_by(&ModelType::ALL, |m| {
            records.iter().filter(|r| r.model_type == m).count()
        }),
        providers: count_by(&Provider::ALL, |p| {
            records.iter().filter(|r| r.provider == p).count()
        }),
        features: count_by(&Feature::ALL, |f| {
            records.iter().filter(|r| r.features.contains(&f)).count()
        }),
        price_range: range_of(records.iter().map(|r| r.price)),
        rating_range: range_of(records.iter().map(|r| r.rating)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PriceRange, test_listing};
    use chrono::{TimeZone, Utc};

    fn record(id: &str, price: f64, rating: f64, downloads: u64, name: &str) -> ListingRecord {
        ListingRecord {
            price,
            rating,
            downloads,
            name: name.to_string(),
            ..test_listing(id)
        }
    }

    fn ids(records: &[ListingRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    fn pair() -> Vec<ListingRecord> {
        vec![
            record("a", 0.02, 4.7, 100, "Zeta"),
            record("b", 0.05, 4.9, 500, "Alpha"),
        ]
    }

    #[test]
    fn test_price_low_and_name_ordering() {
        let records = pair();

        let by_price = filter_and_sort(&records, &QueryState::new().with_sort(SortKey::PriceLow));
        assert_eq!(ids(&by_price), ["a", "b"]);

        let by_name = filter_and_sort(&records, &QueryState::new().with_sort(SortKey::Name));
        assert_eq!(ids(&by_name), ["b", "a"]);
    }

    #[test]
    fn test_name_order_ignores_case_until_tie() {
        let records = vec![
            record("a", 0.01, 4.0, 0, "Banana"),
            record("b", 0.01, 4.0, 0, "apple"),
            record("c", 0.01, 4.0, 0, "Apple"),
            record("d", 0.01, 4.0, 0, "cherry"),
            record("e", 0.01, 4.0, 0, "Éclair"),
        ];
        let sorted = filter_and_sort(&records, &QueryState::new().with_sort(SortKey::Name));
        assert_eq!(ids(&sorted), ["b", "c", "a", "d", "e"]);
    }

    #[test]
    fn test_open_ended_price_range() {
        let query = QueryState::new().with_price_range(PriceRange::at_least(0.03));
        assert_eq!(ids(&filter_and_sort(&pair(), &query)), ["b"]);
    }

    #[test]
    fn test_descending_keys() {
        let records = pair();
        let popular = filter_and_sort(&records, &QueryState::new());
        assert_eq!(ids(&popular), ["b", "a"]);

        let rating = filter_and_sort(&records, &QueryState::new().with_sort(SortKey::Rating));
        assert_eq!(ids(&rating), ["b", "a"]);

        let high = filter_and_sort(&records, &QueryState::new().with_sort(SortKey::PriceHigh));
        assert_eq!(ids(&high), ["b", "a"]);
    }

    #[test]
    fn test_search_is_case_insensitive_over_three_fields() {
        let mut by_desc = test_listing("d");
        by_desc.description = "Fast SPEECH recognition".to_string();
        let mut by_provider = test_listing("p");
        by_provider.provider = Provider::Stability;
        let by_name = record("n", 0.01, 4.0, 0, "SpeechNet");
        let other = test_listing("o");

        let records = vec![by_desc, by_provider, by_name, other];

        let speech = filter_and_sort(&records, &QueryState::new().with_search("speech"));
        assert_eq!(ids(&speech), ["d", "n"]);

        let provider = filter_and_sort(&records, &QueryState::new().with_search("STABILITY ai"));
        assert_eq!(ids(&provider), ["p"]);
    }

    #[test]
    fn test_search_whitespace_is_significant() {
        let plain = record("a", 0.01, 4.0, 0, "Speech");
        let spaced = record("b", 0.01, 4.0, 0, "Speech Net");
        let records = vec![plain, spaced];

        let trailing = filter_and_sort(&records, &QueryState::new().with_search("speech "));
        assert_eq!(ids(&trailing), ["b"]);

        let blank = filter_and_sort(&records, &QueryState::new().with_search(" "));
        assert_eq!(ids(&blank), ["b"]);

        let empty = filter_and_sort(&records, &QueryState::new().with_search(""));
        assert_eq!(empty.len(), 2);
    }

    #[test]
    fn test_multi_valued_filters_or_within_and_across() {
        let mut a = test_listing("a");
        a.category = Category::Image;
        a.features = [Feature::OpenSource].into();
        let mut b = test_listing("b");
        b.category = Category::Audio;
        b.features = [Feature::ApiAccess, Feature::RealTime].into();
        let mut c = test_listing("c");
        c.category = Category::Text;
        c.features = [Feature::RealTime].into();

        let records = vec![a, b, c];

        let either = QueryState::new()
            .with_category(Category::Image)
            .with_category(Category::Audio);
        assert_eq!(ids(&filter_and_sort(&records, &either)), ["a", "b"]);

        let both = either.with_feature(Feature::RealTime);
        assert_eq!(ids(&filter_and_sort(&records, &both)), ["b"]);

        let any_tag = QueryState::new()
            .with_feature(Feature::OpenSource)
            .with_feature(Feature::RealTime);
        assert_eq!(ids(&filter_and_sort(&records, &any_tag)), ["a", "b", "c"]);
    }

    #[test]
    fn test_min_rating_is_inclusive() {
        let query = QueryState::new().with_min_rating(4.7);
        assert_eq!(ids(&filter_and_sort(&pair(), &query)), ["b", "a"]);

        let query = QueryState::new().with_min_rating(4.8);
        assert_eq!(ids(&filter_and_sort(&pair(), &query)), ["b"]);
    }

    #[test]
    fn test_ties_break_by_id() {
        let records = vec![
            record("c", 0.01, 4.0, 10, "Same"),
            record("a", 0.01, 4.0, 10, "Same"),
            record("b", 0.01, 4.0, 10, "Same"),
        ];
        for key in SortKey::ALL {
            let sorted = filter_and_sort(&records, &QueryState::new().with_sort(key));
            assert_eq!(ids(&sorted), ["a", "b", "c"], "sort key {key}");
        }
    }

    #[test]
    fn test_newest_puts_new_first_then_recent() {
        let mut old_new = test_listing("x");
        old_new.is_new = true;
        old_new.created_at = Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        let mut recent_new = test_listing("y");
        recent_new.is_new = true;
        recent_new.created_at = Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap());
        let mut undated_new = test_listing("w");
        undated_new.is_new = true;
        let established = test_listing("a");

        let records = vec![established, old_new, undated_new, recent_new];
        let sorted = filter_and_sort(&records, &QueryState::new().with_sort(SortKey::Newest));
        assert_eq!(ids(&sorted), ["y", "x", "w", "a"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(filter_and_sort(&[], &QueryState::new().with_search("x")).is_empty());
    }

    #[test]
    fn test_matches_agrees_with_filter_and_sort() {
        let query = QueryState::new().with_price_range(PriceRange::at_least(0.03));
        let records = pair();
        assert!(!matches(&records[0], &query));
        assert!(matches(&records[1], &query));
    }

    #[test]
    fn test_filter_options() {
        let mut a = test_listing("a");
        a.category = Category::Image;
        a.features = [Feature::OpenSource, Feature::RealTime].into();
        a.price = 0.2;
        let mut b = test_listing("b");
        b.features = [Feature::RealTime].into();
        b.rating = 3.5;

        let options = filter_options(&[a, b]);

        assert_eq!(options.total(), 2);
        let image = options
            .categories
            .iter()
            .find(|f| f.value == Category::Image)
            .unwrap();
        assert_eq!(image.count, 1);
        let real_time = options
            .features
            .iter()
            .find(|f| f.value == Feature::RealTime)
            .unwrap();
        assert_eq!(real_time.count, 2);
        let price = options.price_range.unwrap();
        assert!((price.min - 0.01).abs() < f64::EPSILON);
        assert!((price.max - 0.2).abs() < f64::EPSILON);
        assert!((options.rating_range.unwrap().min - 3.5).abs() < f64::EPSILON);

        let empty = filter_options(&[]);
        assert_eq!(empty.total(), 0);
        assert!(empty.price_range.is_none());
    }
}
