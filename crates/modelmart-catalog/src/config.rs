//! Public configuration for catalog sources.

use std::time::Duration;

/// Behaviour knobs shared by the catalog sources.
///
/// # Example
///
/// ```
/// use modelmart_catalog::CatalogConfig;
/// use std::time::Duration;
///
/// let config = CatalogConfig::new()
///     .with_latency(Duration::from_millis(250))
///     .with_max_page_size(50);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Artificial delay before every page is returned
    pub(crate) latency: Option<Duration>,
    /// Upper bound on records returned per fetch, regardless of the request
    pub(crate) max_page_size: Option<usize>,
}

impl CatalogConfig {
    /// Create a configuration with no latency and no page cap.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every fetch, simulating a remote marketplace.
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Cap the records returned per fetch. Zero is treated as 1.
    #[must_use]
    pub fn with_max_page_size(mut self, max: usize) -> Self {
        self.max_page_size = Some(max.max(1));
        self
    }

    /// Clamp a requested page length to the configured cap.
    pub(crate) fn clamp_limit(&self, limit: usize) -> usize {
        self.max_page_size.map_or(limit, |max| limit.min(max))
    }
}
