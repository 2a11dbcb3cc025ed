//! Main commands enum and subcommand arguments.

use clap::{Args, Subcommand};
use modelmart_core::{
    Category, Feature, ModelType, PriceRange, PriceTier, Provider, QueryState, SortKey,
};

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Search, filter and sort listings, loading them page by page
    Browse(BrowseArgs),

    /// Show the filter options (facet counts and ranges) of the catalog
    Facets {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Write a deterministic sample catalog as JSON to stdout
    Sample {
        /// Number of listings to generate
        #[arg(short, long, default_value = "48")]
        count: usize,
    },
}

/// Arguments for `browse`.
#[derive(Args, Debug, Clone, Default)]
pub struct BrowseArgs {
    /// Case-insensitive text matched against name, description and provider
    #[arg(short, long)]
    pub search: Option<String>,

    /// Category filter (repeatable or comma-separated)
    #[arg(long = "category", value_delimiter = ',')]
    pub categories: Vec<Category>,

    /// Model architecture filter (repeatable or comma-separated)
    #[arg(long = "model-type", value_delimiter = ',')]
    pub model_types: Vec<ModelType>,

    /// Provider filter (repeatable or comma-separated)
    #[arg(long = "provider", value_delimiter = ',')]
    pub providers: Vec<Provider>,

    /// Feature filter; matches listings with any of the given tags
    #[arg(long = "feature", value_delimiter = ',')]
    pub features: Vec<Feature>,

    /// Minimum price (inclusive)
    #[arg(long, value_parser = parse_finite)]
    pub min_price: Option<f64>,

    /// Maximum price (inclusive)
    #[arg(long, value_parser = parse_finite)]
    pub max_price: Option<f64>,

    /// Named price tier: budget, standard, professional, premium
    #[arg(long, conflicts_with_all = ["min_price", "max_price"])]
    pub tier: Option<PriceTier>,

    /// Minimum rating (inclusive)
    #[arg(long, value_parser = parse_finite)]
    pub min_rating: Option<f64>,

    /// Sort key: popular, newest, rating, price-low, price-high, name
    #[arg(long)]
    pub sort: Option<String>,

    /// Number of pages to load
    #[arg(long)]
    pub pages: Option<usize>,

    /// Listings per page
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl BrowseArgs {
    /// Build the query these arguments describe.
    ///
    /// An unrecognised sort key falls back to popular rather than failing.
    pub fn to_query(&self, default_sort: SortKey) -> QueryState {
        let mut query = QueryState::new().with_sort(
            self.sort
                .as_deref()
                .map_or(default_sort, SortKey::parse_lenient),
        );

        if let Some(search) = self.search.as_deref().map(str::trim) {
            query = query.with_search(search);
        }
        query.filters.categories.extend(self.categories.iter().copied());
        query.filters.model_types.extend(self.model_types.iter().copied());
        query.filters.providers.extend(self.providers.iter().copied());
        query.filters.features.extend(self.features.iter().copied());

        query.filters.price_range = match (self.min_price, self.max_price, self.tier) {
            (None, None, tier) => tier.map(PriceTier::range),
            (min, max, _) => Some(PriceRange::new(min.unwrap_or(0.0), max)),
        };
        query.filters.min_rating = self.min_rating;
        query
    }
}

/// Parse a numeric bound, rejecting NaN and infinities.
fn parse_finite(value: &str) -> Result<f64, String> {
    let parsed = value.trim().parse::<f64>().map_err(|e| e.to_string())?;
    if parsed.is_finite() {
        Ok(parsed)
    } else {
        Err(format!("expected a finite number, got '{value}'"))
    }
}
