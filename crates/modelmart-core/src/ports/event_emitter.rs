//! Event emitter trait for browse events.
//!
//! Implementations handle transport details (channels, UI bridges, logs).

use crate::events::BrowseEvent;

/// Trait for emitting browse events.
///
/// # Implementations
///
/// - `NoopBrowseEmitter` - For tests and CLI contexts that don't need events
/// - Adapter-specific implementations (UI bridge, channel forwarding, etc.)
pub trait BrowseEventEmitter: Send + Sync {
    /// Emit a browse event. Must not block.
    fn emit(&self, event: BrowseEvent);

    /// Clone this emitter into a boxed trait object.
    fn clone_box(&self) -> Box<dyn BrowseEventEmitter>;
}

/// A no-op event emitter for tests and CLI contexts.
#[derive(Debug, Clone, Default)]
pub struct NoopBrowseEmitter;

impl NoopBrowseEmitter {
    pub const fn new() -> Self {
        Self
    }
}

impl BrowseEventEmitter for NoopBrowseEmitter {
    fn emit(&self, _event: BrowseEvent) {}

    fn clone_box(&self) -> Box<dyn BrowseEventEmitter> {
        Box::new(self.clone())
    }
}
