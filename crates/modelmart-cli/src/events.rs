//! Browse event emitter for the terminal.
//!
//! There is no UI to forward events to, so they are written to the log.

use modelmart_core::{BrowseEvent, BrowseEventEmitter};

/// Emits browse events as `tracing` debug records.
#[derive(Debug, Clone, Default)]
pub struct LogEmitter;

impl BrowseEventEmitter for LogEmitter {
    fn emit(&self, event: BrowseEvent) {
        match &event {
            BrowseEvent::PageLoadFailed { page_index, error } => {
                tracing::debug!(event = event.name(), page_index, error = %error, "Browse event");
            }
            _ => tracing::debug!(event = event.name(), "Browse event"),
        }
    }

    fn clone_box(&self) -> Box<dyn BrowseEventEmitter> {
        Box::new(self.clone())
    }
}
