//! Listing and facet tables.

use std::fmt::Display;

use modelmart_core::{FacetCount, FilterOptions, ListingRecord, RangeValues};

use super::tables::{format_price, print_separator, truncate_string};

/// Print listings as a fixed-width table.
pub fn print_listing_table(records: &[ListingRecord]) {
    println!(
        "{:<14} {:<24} {:<12} {:<12} {:<14} {:>7} {:>6} {:>9} Added",
        "ID", "Name", "Category", "Type", "Provider", "Price", "Rating", "Downloads"
    );
    print_separator(118);

    for record in records {
        let added = record
            .created_at
            .map_or_else(|| "--".to_string(), |t| t.format("%Y-%m-%d").to_string());
        let mut flags = String::new();
        if record.is_new {
            flags.push_str(" [new]");
        }
        if record.is_hot {
            flags.push_str(" [hot]");
        }

        println!(
            "{:<14} {:<24} {:<12} {:<12} {:<14} {:>7} {:>6.1} {:>9} {}{}",
            truncate_string(&record.id, 13),
            truncate_string(&record.name, 23),
            record.category.label(),
            record.model_type.label(),
            truncate_string(record.provider.label(), 13),
            format_price(record.price),
            record.rating,
            record.downloads,
            added,
            flags
        );
    }
}

/// Print facet counts and numeric ranges.
pub fn print_facets(options: &FilterOptions) {
    println!("Listings: {}\n", options.total());

    print_counts("Category", &options.categories);
    print_counts("Model type", &options.model_types);
    print_counts("Provider", &options.providers);
    print_counts("Feature", &options.features);

    print_range("Price", options.price_range);
    print_range("Rating", options.rating_range);
}

fn print_counts<T: Display>(title: &str, counts: &[FacetCount<T>]) {
    println!("{title}");
    for facet in counts {
        println!("  {:<20} {:>5}", facet.value.to_string(), facet.count);
    }
    println!();
}

fn print_range(title: &str, range: Option<RangeValues>) {
    match range {
        Some(r) => println!("{title:<10} {} .. {}", r.min, r.max),
        None => println!("{title:<10} --"),
    }
}
