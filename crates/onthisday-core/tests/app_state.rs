use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use onthisday_core::model::decode_day;
use onthisday_core::{AppState, DateKey, Day, DaySource, EventType, OnThisDayError, Result};
use tokio::sync::Semaphore;

const SEPTEMBER_25: &str = include_str!("fixtures/september_25.json");

fn september_25() -> Day {
    decode_day(SEPTEMBER_25.as_bytes()).expect("fixture should decode")
}

/// Serves the fixture for 9/25 and a 503 for anything else.
struct CountingSource {
    calls: AtomicUsize,
}

impl CountingSource {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DaySource for CountingSource {
    async fn fetch_day(&self, month: u32, day: u32) -> Result<Day> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if (month, day) == (9, 25) {
            Ok(september_25())
        } else {
            Err(OnThisDayError::BadResponse { status: 503 })
        }
    }
}

/// Blocks every fetch until a permit is released.
struct GatedSource {
    calls: AtomicUsize,
    gate: Semaphore,
}

impl GatedSource {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            gate: Semaphore::new(0),
        })
    }

    fn release(&self) {
        self.gate.add_permits(1);
    }
}

#[async_trait]
impl DaySource for GatedSource {
    async fn fetch_day(&self, _month: u32, _day: u32) -> Result<Day> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let permit = self
            .gate
            .acquire()
            .await
            .map_err(|e| OnThisDayError::Network(e.to_string()))?;
        permit.forget();
        Ok(september_25())
    }
}

fn session(source: Arc<dyn DaySource>) -> AppState {
    AppState::new(source).with_default_date(DateKey::new(9, 25))
}

#[tokio::test]
async fn test_get_or_fetch_hits_network_once() {
    let source = CountingSource::new();
    let state = session(source.clone());

    let first = state.get_or_fetch(9, 25).await.expect("first fetch");
    let second = state.get_or_fetch(9, 25).await.expect("second fetch");

    assert_eq!(source.calls(), 1);
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(second.display_date(), "September 25");
}

#[tokio::test]
async fn test_bad_response_leaves_cache_unchanged() {
    let source = CountingSource::new();
    let state = session(source.clone());
    state.get_or_fetch(9, 25).await.expect("seed cache");
    let before = state.cached_dates();

    let err = state.get_or_fetch(3, 1).await.unwrap_err();

    assert_eq!(err, OnThisDayError::BadResponse { status: 503 });
    assert!(!state.is_loading());
    assert_eq!(state.cached_dates(), before);
    assert!(state.cached(DateKey::new(3, 1)).is_none());
}

#[tokio::test]
async fn test_failed_fetch_is_not_cached_and_can_be_retried() {
    let source = CountingSource::new();
    let state = session(source.clone());

    assert!(state.get_or_fetch(3, 1).await.is_err());
    assert!(state.get_or_fetch(3, 1).await.is_err());
    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn test_data_for_single_category_keeps_order() {
    let state = session(CountingSource::new());
    state.load_default().await.expect("load");

    let births = state.data_for(Some(EventType::Births), None, "");
    let years: Vec<&str> = births.iter().map(|e| e.year.as_str()).collect();
    assert_eq!(years, vec!["1897", "1920", "1951"]);
}

#[tokio::test]
async fn test_data_for_union_search() {
    let state = session(CountingSource::new());
    state.load_default().await.expect("load");

    let found = state.data_for(None, None, "MOON");
    assert_eq!(found.len(), 2);
    assert!(found[0].text.starts_with("Moon landing"));
    assert!(found[1].text.contains("moonshine"));
}

#[tokio::test]
async fn test_count_for_uncached_date_is_zero_without_fetch() {
    let source = CountingSource::new();
    let state = session(source.clone());

    let march_1 = DateKey::parse("March 1").expect("parse");
    assert_eq!(state.count_for(EventType::Deaths, Some(march_1)), 0);
    assert!(state.data_for(None, Some(march_1), "").is_empty());
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn test_counts_for_cached_date() {
    let state = session(CountingSource::new());
    state.get_or_fetch(9, 25).await.expect("fetch");

    let date = Some(DateKey::new(9, 25));
    assert_eq!(state.count_for(EventType::Events, date), 5);
    assert_eq!(state.count_for(EventType::Births, date), 3);
    assert_eq!(state.count_for(EventType::Deaths, date), 1);
    assert_eq!(state.totals_for(date).total(), 9);
}

#[tokio::test]
async fn test_concurrent_requests_for_same_date_join() {
    let source = GatedSource::new();
    let state = session(source.clone());

    let (first, second, _) = tokio::join!(
        state.get_or_fetch(9, 25),
        state.get_or_fetch(9, 25),
        async {
            tokio::task::yield_now().await;
            assert!(state.is_loading());
            source.release();
        }
    );

    let first = first.expect("first");
    let second = second.expect("second");
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    assert!(!state.is_loading());
}

#[tokio::test]
async fn test_loading_flag_is_observable() {
    let source = GatedSource::new();
    let state = Arc::new(session(source.clone()));
    let mut loading = state.subscribe_loading();
    assert!(!*loading.borrow());

    let task = tokio::spawn({
        let state = Arc::clone(&state);
        async move { state.get_or_fetch(9, 25).await }
    });

    loading.wait_for(|value| *value).await.expect("loading set");
    source.release();
    task.await.expect("join").expect("fetch");
    loading.wait_for(|value| !*value).await.expect("loading cleared");
    assert!(state.cached(DateKey::new(9, 25)).is_some());
}

#[tokio::test]
async fn test_cancelled_fetch_resets_loading_and_skips_cache() {
    let source = GatedSource::new();
    let state = Arc::new(session(source.clone()));
    let mut loading = state.subscribe_loading();

    let task = tokio::spawn({
        let state = Arc::clone(&state);
        async move { state.get_or_fetch(9, 25).await }
    });
    loading.wait_for(|value| *value).await.expect("loading set");

    task.abort();
    assert!(task.await.unwrap_err().is_cancelled());

    assert!(!state.is_loading());
    assert!(state.cached(DateKey::new(9, 25)).is_none());
}

#[tokio::test]
async fn test_shutdown_discards_in_flight_result() {
    let source = GatedSource::new();
    let state = Arc::new(session(source.clone()));
    let mut loading = state.subscribe_loading();

    let task = tokio::spawn({
        let state = Arc::clone(&state);
        async move { state.get_or_fetch(9, 25).await }
    });
    loading.wait_for(|value| *value).await.expect("loading set");

    state.shutdown();
    source.release();

    let err = task.await.expect("join").unwrap_err();
    assert_eq!(err, OnThisDayError::Cancelled);
    assert!(state.cached_dates().is_empty());
    assert!(!state.is_loading());
}
