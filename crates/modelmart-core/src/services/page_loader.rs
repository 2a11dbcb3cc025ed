//! Single-flight page loader over a [`ListingSourcePort`].
//!
//! # State machine
//!
//! ```text
//! Idle ──load──▶ Loading ──ok──▶ Idle
//!                   │
//!                   ├──err──▶ Error ──load──▶ Loading
//!                   │
//!                   └──cancel / drop──▶ (previous phase)
//! ```
//!
//! # Concurrency Model
//!
//! - At most one load is in flight per loader; a second request while
//!   `Loading` returns [`LoadOutcome::Dropped`] without touching the source.
//! - The state mutex is never held across an `.await`.
//! - Failed, cancelled and dropped futures leave the page state exactly as it
//!   was before the attempt.
//! - `reset` bumps a generation counter so a load that was already in flight
//!   cannot commit into the fresh state.
//!
//! # Short batches
//!
//! Sources may cap how many records one fetch returns. A batch shorter than
//! requested is followed by further fetches within the same attempt until
//! the page is full, the source total is reached, or an empty batch arrives.
//! Only the last two end paging.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio_util::sync::CancellationToken;

use crate::domain::PageState;
use crate::events::BrowseEvent;
use crate::ports::{
    BrowseEventEmitter, ListingSourcePort, NoopBrowseEmitter, PageRequest, SourceError,
    SourcePage, SourceResult,
};

/// Current phase of the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Idle,
    Loading,
    /// The last attempt failed. The next attempt is allowed.
    Error,
}

/// What a single `load_next` call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A page was merged into the state.
    Loaded { appended: usize, has_more: bool },
    /// Nothing left to load; the source was not called.
    Exhausted,
    /// Another load was already in flight; this request was ignored.
    Dropped,
    /// The attempt was cancelled or superseded by a reset; nothing applied.
    Cancelled,
    /// The source failed; nothing applied.
    Failed(SourceError),
}

struct LoaderState {
    page: PageState,
    phase: LoadPhase,
    last_error: Option<SourceError>,
    total_known: Option<usize>,
    generation: u64,
}

/// Incremental listing loader enforcing one in-flight load at a time.
pub struct PageLoader {
    source: Arc<dyn ListingSourcePort>,
    emitter: Arc<dyn BrowseEventEmitter>,
    state: Mutex<LoaderState>,
}

impl PageLoader {
    /// Create a loader with an empty page state.
    pub fn new(source: Arc<dyn ListingSourcePort>, page_size: usize) -> Self {
        Self {
            source,
            emitter: Arc::new(NoopBrowseEmitter::new()),
            state: Mutex::new(LoaderState {
                page: PageState::new(page_size),
                phase: LoadPhase::Idle,
                last_error: None,
                total_known: None,
                generation: 0,
            }),
        }
    }

    /// Attach an event emitter.
    #[must_use]
    pub fn with_emitter(mut self, emitter: Arc<dyn BrowseEventEmitter>) -> Self {
        self.emitter = emitter;
        self
    }

    /// Clone of the current page state.
    pub fn snapshot(&self) -> PageState {
        self.lock_state().page.clone()
    }

    pub fn phase(&self) -> LoadPhase {
        self.lock_state().phase
    }

    /// Error from the most recent failed attempt, cleared on success.
    pub fn last_error(&self) -> Option<SourceError> {
        self.lock_state().last_error.clone()
    }

    /// Source total reported by the last successful fetch.
    pub fn total_known(&self) -> Option<usize> {
        self.lock_state().total_known
    }

    /// Discard all loaded pages (e.g. because the source changed).
    ///
    /// A load still in flight finishes without applying its result.
    pub fn reset(&self) {
        let mut state = self.lock_state();
        let page_size = state.page.page_size;
        state.page = PageState::new(page_size);
        state.phase = LoadPhase::Idle;
        state.last_error = None;
        state.total_known = None;
        state.generation += 1;
        tracing::debug!(generation = state.generation, "Page loader reset");
    }

    /// Load the next page.
    pub async fn load_next(&self) -> LoadOutcome {
        self.load_next_cancellable(&CancellationToken::new()).await
    }

    /// Load the next page, giving up when `cancel` fires.
    ///
    /// No timeout is imposed here; wrap the call in `tokio::time::timeout`
    /// if one is needed. A timed-out (dropped) future rolls back like a
    /// cancellation.
    pub async fn load_next_cancellable(&self, cancel: &CancellationToken) -> LoadOutcome {
        let attempt = match self.begin() {
            Ok(attempt) => attempt,
            Err(outcome) => return outcome,
        };

        match self.fetch_full_page(&attempt, cancel).await {
            Some(result) => attempt.finish(result),
            None => {
                drop(attempt);
                LoadOutcome::Cancelled
            }
        }
    }

    /// Fetch one logical page, issuing follow-up requests while the source
    /// returns short batches that do not reach its total.
    ///
    /// Returns `None` when `cancel` fires. A failure part-way through
    /// discards the records gathered so far.
    async fn fetch_full_page(
        &self,
        attempt: &Attempt<'_>,
        cancel: &CancellationToken,
    ) -> Option<SourceResult<SourcePage>> {
        let mut request = attempt.request;
        let mut records = Vec::new();

        loop {
            let result = tokio::select! {
                biased;
                () = cancel.cancelled() => return None,
                result = self.source.fetch_page(request) => result,
            };
            let batch = match result {
                Ok(batch) => batch,
                Err(e) => return Some(Err(e)),
            };

            let received = batch.records.len();
            let total = batch.total;
            records.extend(batch.records);

            let wanted = attempt
                .page_size
                .min(total.saturating_sub(attempt.loaded));
            let next_offset = request.offset + received;
            if received == 0 || records.len() >= wanted || next_offset >= total {
                return Some(Ok(SourcePage { records, total }));
            }

            tracing::debug!(
                page_index = attempt.page_index,
                received,
                next_offset,
                "Short batch, fetching remainder of page"
            );
            request = PageRequest::new(next_offset, wanted - records.len());
        }
    }

    /// Load up to `count` pages, stopping early when the source runs dry or
    /// the loader is busy.
    ///
    /// Returns the number of pages merged.
    pub async fn load_pages(&self, count: usize) -> SourceResult<usize> {
        let mut loaded = 0;
        for _ in 0..count {
            match self.load_next().await {
                LoadOutcome::Loaded { has_more, .. } => {
                    loaded += 1;
                    if !has_more {
                        break;
                    }
                }
                LoadOutcome::Failed(e) => return Err(e),
                LoadOutcome::Exhausted | LoadOutcome::Dropped | LoadOutcome::Cancelled => break,
            }
        }
        Ok(loaded)
    }

    fn begin(&self) -> Result<Attempt<'_>, LoadOutcome> {
        let mut state = self.lock_state();

        if state.phase == LoadPhase::Loading {
            drop(state);
            tracing::debug!("Load already in flight, dropping request");
            self.emitter.emit(BrowseEvent::PageLoadDropped);
            return Err(LoadOutcome::Dropped);
        }
        if !state.page.has_more {
            return Err(LoadOutcome::Exhausted);
        }

        let limit = state
            .total_known
            .map_or(state.page.page_size, |total| state.page.next_page_len(total));
        let request = PageRequest::new(state.page.next_offset(), limit);
        let page_index = state.page.current_page_index;
        let page_size = state.page.page_size;
        let loaded = state.page.len();
        let previous_phase = state.phase;
        state.phase = LoadPhase::Loading;
        let generation = state.generation;
        drop(state);

        tracing::debug!(
            page_index,
            offset = request.offset,
            limit = request.limit,
            "Loading page"
        );
        self.emitter
            .emit(BrowseEvent::PageLoadStarted { page_index });

        Ok(Attempt {
            loader: self,
            request,
            page_index,
            page_size,
            loaded,
            previous_phase,
            generation,
            armed: true,
        })
    }

    fn lock_state(&self) -> MutexGuard<'_, LoaderState> {
        // State is replaced wholesale on every transition, so a poisoned
        // guard still holds a consistent value.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// One in-flight load. Dropping it without `finish` rolls the phase back.
struct Attempt<'a> {
    loader: &'a PageLoader,
    request: PageRequest,
    page_index: usize,
    page_size: usize,
    /// Records held when the attempt began.
    loaded: usize,
    previous_phase: LoadPhase,
    generation: u64,
    armed: bool,
}

impl Attempt<'_> {
    fn finish(mut self, result: SourceResult<SourcePage>) -> LoadOutcome {
        self.armed = false;
        let loader = self.loader;
        let mut state = loader.lock_state();

        if state.generation != self.generation {
            tracing::debug!(
                page_index = self.page_index,
                "Ignoring stale page (loader was reset)"
            );
            return LoadOutcome::Cancelled;
        }

        match result {
            Ok(fetched) => {
                let total_known = fetched.total;
                let wanted = state.page.next_page_len(total_known);
                // Short only when the source ran dry before `total`.
                let exhausted = fetched.records.len() < wanted;
                let before = state.page.len();

                state.page =
                    state
                        .page
                        .apply_batch(fetched.records.into_iter().take(wanted), total_known, exhausted);
                state.phase = LoadPhase::Idle;
                state.last_error = None;
                state.total_known = Some(total_known);

                let appended = state.page.len() - before;
                let has_more = state.page.has_more;
                let total_loaded = state.page.len();
                drop(state);

                tracing::info!(
                    page_index = self.page_index,
                    appended,
                    total_loaded,
                    has_more,
                    "Page loaded"
                );
                loader.emitter.emit(BrowseEvent::PageLoaded {
                    page_index: self.page_index,
                    appended,
                    total_loaded,
                    has_more,
                });
                LoadOutcome::Loaded { appended, has_more }
            }
            Err(e) => {
                state.phase = LoadPhase::Error;
                state.last_error = Some(e.clone());
                drop(state);

                tracing::warn!(page_index = self.page_index, error = %e, "Page load failed");
                loader.emitter.emit(BrowseEvent::PageLoadFailed {
                    page_index: self.page_index,
                    error: e.to_string(),
                });
                LoadOutcome::Failed(e)
            }
        }
    }
}

impl Drop for Attempt<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut state = self.loader.lock_state();
        if state.generation == self.generation && state.phase == LoadPhase::Loading {
            state.phase = self.previous_phase;
        }
        drop(state);

        tracing::debug!(page_index = self.page_index, "Page load cancelled");
        self.loader.emitter.emit(BrowseEvent::PageLoadCancelled {
            page_index: self.page_index,
        });
    }
}
