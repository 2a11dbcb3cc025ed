//! Integration tests for query engine properties.
//!
//! Runs the engine over a fixed, varied collection and checks the properties
//! that must hold for every query: idempotence, input-order independence,
//! monotonic narrowing, stable tie-breaks and paging exactness.

use std::collections::{BTreeSet, HashSet};

use modelmart_core::{
    Category, Feature, ListingRecord, ModelType, PageState, PriceRange, Provider, QueryState,
    SortKey, filter_and_sort, load_next_page,
};

#[allow(clippy::cast_precision_loss)]
fn record(i: usize) -> ListingRecord {
    let features: BTreeSet<Feature> = Feature::ALL
        .iter()
        .copied()
        .enumerate()
        .filter(|(n, _)| (i + n) % 3 == 0)
        .map(|(_, f)| f)
        .collect();

    ListingRecord {
        id: format!("listing-{i:03}"),
        name: format!("{} Model {}", ["Nova", "Atlas", "Echo", "Lumen"][i % 4], i % 7),
        description: format!("{} model number {i}", ["Fast", "Accurate", "Tiny"][i % 3]),
        category: Category::ALL[i % Category::ALL.len()],
        model_type: ModelType::ALL[(i / 2) % ModelType::ALL.len()],
        provider: Provider::ALL[(i * 5) % Provider::ALL.len()],
        price: ((i * 37) % 15) as f64 / 100.0,
        rating: 3.0 + ((i * 13) % 21) as f64 / 10.0,
        reviews: (i * 11 % 50) as u64,
        downloads: ((i * 7919) % 500) as u64,
        features,
        is_new: i % 5 == 0,
        is_hot: i % 6 == 0,
        created_at: None,
    }
}

fn collection() -> Vec<ListingRecord> {
    (0..60).map(record).collect()
}

fn queries() -> Vec<QueryState> {
    let mut out: Vec<QueryState> = SortKey::ALL
        .iter()
        .map(|&k| QueryState::new().with_sort(k))
        .collect();

    out.push(QueryState::new().with_search("atlas"));
    out.push(QueryState::new().with_search("ACCURATE").with_sort(SortKey::Rating));
    out.push(
        QueryState::new()
            .with_category(Category::Image)
            .with_category(Category::Audio)
            .with_sort(SortKey::PriceLow),
    );
    out.push(
        QueryState::new()
            .with_provider(Provider::Meta)
            .with_feature(Feature::OpenSource)
            .with_min_rating(3.5),
    );
    out.push(
        QueryState::new()
            .with_price_range(PriceRange::at_least(0.1))
            .with_sort(SortKey::PriceHigh),
    );
    out.push(
        QueryState::new()
            .with_model_type(ModelType::Diffusion)
            .with_price_range(PriceRange::new(0.02, Some(0.08)))
            .with_sort(SortKey::Name),
    );
    out
}

fn ids(records: &[ListingRecord]) -> Vec<String> {
    records.iter().map(|r| r.id.clone()).collect()
}

#[test]
fn test_filtering_is_idempotent() {
    let records = collection();
    for query in queries() {
        let once = filter_and_sort(&records, &query);
        let twice = filter_and_sort(&once, &query);
        assert_eq!(ids(&once), ids(&twice), "query: {query:?}");
    }
}

#[test]
fn test_output_independent_of_input_order() {
    let records = collection();
    let mut reversed = records.clone();
    reversed.reverse();
    let mut rotated = records.clone();
    rotated.rotate_left(17);

    for query in queries() {
        let expected = ids(&filter_and_sort(&records, &query));
        assert_eq!(ids(&filter_and_sort(&reversed, &query)), expected);
        assert_eq!(ids(&filter_and_sort(&rotated, &query)), expected);
    }
}

#[test]
fn test_additional_filter_never_widens_result() {
    let records = collection();
    let narrowing: [fn(QueryState) -> QueryState; 6] = [
        |q| q.with_search("nova"),
        |q| q.with_category(Category::Text),
        |q| q.with_model_type(ModelType::Transformer),
        |q| q.with_feature(Feature::ApiAccess),
        |q| q.with_price_range(PriceRange::new(0.0, Some(0.05))),
        |q| q.with_min_rating(4.2),
    ];

    for query in queries() {
        let base = filter_and_sort(&records, &query).len();
        for narrow in narrowing {
            let narrowed = narrow(query.clone());
            assert!(
                filter_and_sort(&records, &narrowed).len() <= base,
                "narrowing widened: {narrowed:?}"
            );
        }
    }
}

#[test]
fn test_equal_keys_appear_in_id_order() {
    let mut records = collection();
    for r in &mut records {
        r.downloads = 42;
        r.price = 0.03;
        r.rating = 4.0;
        r.name = "Same".to_string();
        r.is_new = false;
    }
    let mut expected = ids(&records);
    expected.sort();

    for key in SortKey::ALL {
        let query = QueryState::new().with_sort(key);
        assert_eq!(ids(&filter_and_sort(&records, &query)), expected, "{key}");
        // Repeated calls agree.
        assert_eq!(ids(&filter_and_sort(&records, &query)), expected, "{key}");
    }
}

#[test]
fn test_paging_loads_each_record_exactly_once() {
    let source = collection();
    for page_size in [1, 7, 12, 60, 100] {
        let mut page = PageState::new(page_size);
        let mut calls = 0;
        while page.has_more {
            page = load_next_page(&page, &source, source.len());
            calls += 1;
            assert!(calls <= source.len(), "paging did not terminate");
        }

        assert_eq!(page.len(), source.len());
        let unique: HashSet<&str> = page.loaded_records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(unique.len(), source.len());
        assert_eq!(ids(&page.loaded_records), ids(&source));
    }
}

#[test]
fn test_documented_scenario() {
    let mut a = record(0);
    a.id = "a".to_string();
    a.price = 0.02;
    a.rating = 4.7;
    a.downloads = 100;
    a.name = "Zeta".to_string();

    let mut b = record(1);
    b.id = "b".to_string();
    b.price = 0.05;
    b.rating = 4.9;
    b.downloads = 500;
    b.name = "Alpha".to_string();

    let records = vec![a, b];

    let by_price = filter_and_sort(&records, &QueryState::new().with_sort(SortKey::PriceLow));
    assert_eq!(ids(&by_price), ["a", "b"]);

    let by_name = filter_and_sort(&records, &QueryState::new().with_sort(SortKey::Name));
    assert_eq!(ids(&by_name), ["b", "a"]);

    let premium = filter_and_sort(
        &records,
        &QueryState::new().with_price_range(PriceRange::at_least(0.03)),
    );
    assert_eq!(ids(&premium), ["b"]);
}

#[test]
fn test_unknown_query_input_degrades_gracefully() {
    let records = collection();
    let query = QueryState::from_params([("sort", "trending"), ("colour", "red")]);
    assert_eq!(query, QueryState::new());
    assert_eq!(filter_and_sort(&records, &query).len(), records.len());
}
