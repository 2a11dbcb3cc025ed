//! Integration tests for the single-flight page loader.
//!
//! A gated in-memory source holds every fetch until the test releases it,
//! which makes "a second load while the first is pending" deterministic.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use modelmart_core::{
    BrowseEvent, BrowseEventEmitter, Category, ListingRecord, ListingSourcePort, LoadOutcome,
    LoadPhase, ModelType, PageLoader, PageRequest, PageState, Provider, SourceError, SourcePage,
    SourceResult, load_next_page,
};
use tokio::sync::Semaphore;
use tokio_test::{assert_pending, assert_ready_eq, task};
use tokio_util::sync::CancellationToken;

fn listing(i: usize) -> ListingRecord {
    ListingRecord {
        id: format!("m{i:02}"),
        name: format!("Model {i}"),
        description: String::new(),
        category: Category::Text,
        model_type: ModelType::Transformer,
        provider: Provider::Community,
        price: 0.01,
        rating: 4.0,
        reviews: 0,
        downloads: 0,
        features: Default::default(),
        is_new: false,
        is_hot: false,
        created_at: None,
    }
}

/// Source whose fetches wait for a permit.
struct GatedSource {
    records: Vec<ListingRecord>,
    gate: Semaphore,
    calls: AtomicUsize,
}

impl GatedSource {
    fn new(count: usize) -> Arc<Self> {
        Arc::new(Self {
            records: (0..count).map(listing).collect(),
            gate: Semaphore::new(0),
            calls: AtomicUsize::new(0),
        })
    }

    fn release(&self, fetches: usize) {
        self.gate.add_permits(fetches);
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ListingSourcePort for GatedSource {
    async fn fetch_page(&self, request: PageRequest) -> SourceResult<SourcePage> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let permit = self
            .gate
            .acquire()
            .await
            .map_err(|_| SourceError::Unavailable {
                message: "gate closed".to_string(),
            })?;
        permit.forget();

        Ok(SourcePage {
            records: self
                .records
                .iter()
                .skip(request.offset)
                .take(request.limit)
                .cloned()
                .collect(),
            total: self.records.len(),
        })
    }

    async fn total_count(&self) -> SourceResult<usize> {
        Ok(self.records.len())
    }
}

#[derive(Clone, Default)]
struct RecordingEmitter {
    events: Arc<Mutex<Vec<BrowseEvent>>>,
}

impl RecordingEmitter {
    fn names(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().iter().map(BrowseEvent::name).collect()
    }
}

impl BrowseEventEmitter for RecordingEmitter {
    fn emit(&self, event: BrowseEvent) {
        self.events.lock().unwrap().push(event);
    }

    fn clone_box(&self) -> Box<dyn BrowseEventEmitter> {
        Box::new(self.clone())
    }
}

#[tokio::test]
async fn test_second_load_while_pending_is_dropped() {
    let source = GatedSource::new(10);
    let emitter = RecordingEmitter::default();
    let loader = PageLoader::new(source.clone(), 4).with_emitter(Arc::new(emitter.clone()));

    let mut first = task::spawn(loader.load_next());
    assert_pending!(first.poll());
    assert_eq!(loader.phase(), LoadPhase::Loading);

    // Resolves immediately without reaching the source.
    assert_eq!(loader.load_next().await, LoadOutcome::Dropped);
    assert_eq!(source.calls(), 1);

    source.release(1);
    assert!(first.is_woken());
    assert_ready_eq!(
        first.poll(),
        LoadOutcome::Loaded {
            appended: 4,
            has_more: true
        }
    );
    drop(first);

    // Identical to what the first load alone produces.
    let all: Vec<ListingRecord> = (0..10).map(listing).collect();
    let expected = load_next_page(&PageState::new(4), &all, all.len());
    assert_eq!(loader.snapshot(), expected);
    assert_eq!(loader.phase(), LoadPhase::Idle);

    assert_eq!(
        emitter.names(),
        ["page_load_started", "page_load_dropped", "page_loaded"]
    );
}

#[tokio::test]
async fn test_cancelled_load_leaves_state_unchanged() {
    let source = GatedSource::new(10);
    let emitter = RecordingEmitter::default();
    let loader = PageLoader::new(source.clone(), 3).with_emitter(Arc::new(emitter.clone()));

    source.release(1);
    loader.load_next().await;
    let before = loader.snapshot();

    let token = CancellationToken::new();
    let mut pending = task::spawn(loader.load_next_cancellable(&token));
    assert_pending!(pending.poll());

    token.cancel();
    assert!(pending.is_woken());
    assert_ready_eq!(pending.poll(), LoadOutcome::Cancelled);
    drop(pending);

    assert_eq!(loader.snapshot(), before);
    assert!(loader.snapshot().has_more);
    assert_eq!(loader.phase(), LoadPhase::Idle);
    assert!(emitter.names().contains(&"page_load_cancelled"));

    // The next attempt fetches the same offset again.
    source.release(1);
    assert!(matches!(
        loader.load_next().await,
        LoadOutcome::Loaded { appended: 3, .. }
    ));
    assert_eq!(loader.snapshot().len(), 6);
}

#[tokio::test]
async fn test_timed_out_load_rolls_back() {
    let source = GatedSource::new(5);
    let loader = PageLoader::new(source.clone(), 2);

    let result = tokio::time::timeout(Duration::from_millis(20), loader.load_next()).await;
    assert!(result.is_err());

    assert!(loader.snapshot().is_empty());
    assert!(loader.snapshot().has_more);
    assert_eq!(loader.phase(), LoadPhase::Idle);

    source.release(1);
    assert!(matches!(loader.load_next().await, LoadOutcome::Loaded { .. }));
}

#[tokio::test]
async fn test_reset_discards_in_flight_page() {
    let source = GatedSource::new(6);
    let loader = PageLoader::new(source.clone(), 3);

    let mut pending = task::spawn(loader.load_next());
    assert_pending!(pending.poll());

    loader.reset();
    assert_eq!(loader.phase(), LoadPhase::Idle);

    source.release(1);
    assert_ready_eq!(pending.poll(), LoadOutcome::Cancelled);
    drop(pending);

    assert!(loader.snapshot().is_empty());
    assert_eq!(loader.snapshot().current_page_index, 0);
}

#[tokio::test]
async fn test_async_paging_is_exact() {
    let source = GatedSource::new(11);
    let loader = PageLoader::new(source.clone(), 4);
    source.release(100);

    assert_eq!(loader.load_pages(usize::MAX).await, Ok(3));
    let page = loader.snapshot();
    assert_eq!(page.len(), 11);
    assert!(!page.has_more);
    assert_eq!(page.current_page_index, 3);

    assert_eq!(loader.load_next().await, LoadOutcome::Exhausted);
    assert_eq!(source.calls(), 3);
}
