//! Browse events emitted while paging through listings.
//!
//! # Wire Format
//!
//! Events are serialized with a `type` tag:
//!
//! ```json
//! { "type": "page_loaded", "pageIndex": 1, "appended": 12, "totalLoaded": 24, "hasMore": true }
//! ```

use serde::{Deserialize, Serialize};

/// Page loading lifecycle events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BrowseEvent {
    /// A page load started.
    PageLoadStarted {
        #[serde(rename = "pageIndex")]
        page_index: usize,
    },

    /// A page was fetched and merged into the page state.
    PageLoaded {
        #[serde(rename = "pageIndex")]
        page_index: usize,
        /// Records actually appended (duplicates excluded).
        appended: usize,
        #[serde(rename = "totalLoaded")]
        total_loaded: usize,
        #[serde(rename = "hasMore")]
        has_more: bool,
    },

    /// The source failed; the page state was left untouched.
    PageLoadFailed {
        #[serde(rename = "pageIndex")]
        page_index: usize,
        error: String,
    },

    /// A load request arrived while another was in flight and was dropped.
    PageLoadDropped,

    /// A load was cancelled before it completed; nothing was applied.
    PageLoadCancelled {
        #[serde(rename = "pageIndex")]
        page_index: usize,
    },
}

impl BrowseEvent {
    /// Short name of the event, as used in the `type` tag.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::PageLoadStarted { .. } => "page_load_started",
            Self::PageLoaded { .. } => "page_loaded",
            Self::PageLoadFailed { .. } => "page_load_failed",
            Self::PageLoadDropped => "page_load_dropped",
            Self::PageLoadCancelled { .. } => "page_load_cancelled",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_wire_format() {
        let event = BrowseEvent::PageLoaded {
            page_index: 1,
            appended: 12,
            total_loaded: 24,
            has_more: true,
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "page_loaded");
        assert_eq!(value["pageIndex"], 1);
        assert_eq!(value["hasMore"], true);
        assert_eq!(value["type"], event.name());
    }

    #[test]
    fn test_unit_variant_tag() {
        let value = serde_json::to_value(BrowseEvent::PageLoadDropped).unwrap();
        assert_eq!(value["type"], "page_load_dropped");
    }
}
