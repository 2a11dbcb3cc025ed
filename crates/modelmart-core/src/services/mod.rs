//! Application services built on top of the ports.
//!
//! Services hold `Arc<dyn Port>` handles and own the coordination logic
//! (single-flight loading, rollback) that pure domain functions cannot.

mod page_loader;

pub use page_loader::{LoadOutcome, LoadPhase, PageLoader};
