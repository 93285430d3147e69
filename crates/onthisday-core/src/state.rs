//! Session state: the day cache and fetch orchestration.
//!
//! `AppState` is constructed once per session and shared by handle. It is
//! the only place fetched days are stored. Reads go through the pure
//! functions in [`crate::query`].
//!
//! Fetches are tracked per date: concurrent requests for the same date join
//! one shared network call instead of racing, and the loading flag stays set
//! while any fetch is in flight.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures_util::future::{BoxFuture, FutureExt, Shared};
use tokio::sync::watch;

use crate::date::DateKey;
use crate::error::{OnThisDayError, Result};
use crate::fetch::DaySource;
use crate::model::{Day, Event, EventType};
use crate::query::{self, CategoryTotals, EventQuery};

type SharedFetch = Shared<BoxFuture<'static, Result<Arc<Day>>>>;

struct InFlight {
    fetch: SharedFetch,
    /// Callers currently awaiting `fetch`
    waiters: usize,
}

#[derive(Default)]
struct Inner {
    days: HashMap<DateKey, Arc<Day>>,
    in_flight: HashMap<DateKey, InFlight>,
    closed: bool,
}

/// Session-scoped day cache.
pub struct AppState {
    source: Arc<dyn DaySource>,
    inner: Mutex<Inner>,
    loading: watch::Sender<bool>,
    default_date: DateKey,
}

impl AppState {
    /// Create an empty session whose default date is today.
    pub fn new(source: Arc<dyn DaySource>) -> Self {
        let (loading, _) = watch::channel(false);
        Self {
            source,
            inner: Mutex::new(Inner::default()),
            loading,
            default_date: DateKey::today(),
        }
    }

    /// Replace the date used when a query leaves its date unset.
    pub fn with_default_date(mut self, date: DateKey) -> Self {
        self.default_date = date;
        self
    }

    pub fn default_date(&self) -> DateKey {
        self.default_date
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Return the cached day for `month`/`day`, fetching it if absent.
    ///
    /// On failure the cache is left unchanged and the error is returned as
    /// is. If another call is already fetching the same date, this call
    /// waits for that fetch and shares its outcome.
    ///
    /// # Errors
    ///
    /// - `OnThisDayError::Network`, `BadResponse` or `Decode` from the source
    /// - `OnThisDayError::Cancelled` if the session was shut down
    pub async fn get_or_fetch(&self, month: u32, day: u32) -> Result<Arc<Day>> {
        let key = DateKey::new(month, day);

        let fetch = {
            let mut inner = self.lock();
            if inner.closed {
                return Err(OnThisDayError::Cancelled);
            }
            if let Some(cached) = inner.days.get(&key) {
                tracing::debug!(date = %key, "cache hit");
                return Ok(Arc::clone(cached));
            }

            let fetch = match inner.in_flight.get_mut(&key) {
                Some(pending) => {
                    tracing::debug!(date = %key, "joining in-flight fetch");
                    pending.waiters += 1;
                    pending.fetch.clone()
                }
                None => {
                    tracing::debug!(date = %key, "cache miss, fetching");
                    let source = Arc::clone(&self.source);
                    let fetch = async move { source.fetch_day(month, day).await.map(Arc::new) }
                        .boxed()
                        .shared();
                    inner.in_flight.insert(
                        key,
                        InFlight {
                            fetch: fetch.clone(),
                            waiters: 1,
                        },
                    );
                    fetch
                }
            };
            self.publish_loading(&inner);
            fetch
        };

        let guard = WaiterGuard { state: self, key };
        let outcome = fetch.await;
        let result = self.complete(key, outcome);
        drop(guard);
        result
    }

    /// Fetch (or return) the default date.
    pub async fn load_default(&self) -> Result<Arc<Day>> {
        let date = self.default_date;
        self.get_or_fetch(date.month, date.day).await
    }

    fn complete(&self, key: DateKey, outcome: Result<Arc<Day>>) -> Result<Arc<Day>> {
        let mut inner = self.lock();
        if inner.closed {
            tracing::debug!(date = %key, "session closed, discarding fetch result");
            return Err(OnThisDayError::Cancelled);
        }
        let fetched = outcome?;
        let stored = inner.days.entry(key).or_insert(fetched);
        Ok(Arc::clone(stored))
    }

    fn release(&self, key: DateKey) {
        let mut inner = self.lock();
        if let Some(pending) = inner.in_flight.get_mut(&key) {
            pending.waiters = pending.waiters.saturating_sub(1);
            if pending.waiters == 0 {
                inner.in_flight.remove(&key);
            }
        }
        self.publish_loading(&inner);
    }

    fn publish_loading(&self, inner: &Inner) {
        let loading = !inner.in_flight.is_empty();
        self.loading.send_if_modified(|current| {
            let changed = *current != loading;
            *current = loading;
            changed
        });
    }

    /// Whether any fetch is in flight.
    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    /// Observe the loading flag.
    pub fn subscribe_loading(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    /// Close the session. Fetches that resolve afterwards are discarded and
    /// new fetches are refused.
    pub fn shutdown(&self) {
        let mut inner = self.lock();
        inner.closed = true;
        tracing::debug!(in_flight = inner.in_flight.len(), "session shut down");
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    /// Cached day for `date`, without fetching.
    pub fn cached(&self, date: DateKey) -> Option<Arc<Day>> {
        self.lock().days.get(&date).cloned()
    }

    /// Dates currently cached, in calendar order.
    pub fn cached_dates(&self) -> Vec<DateKey> {
        let mut dates: Vec<DateKey> = self.lock().days.keys().copied().collect();
        dates.sort();
        dates
    }

    /// Copy of the cache map for callers that run their own derivations.
    pub fn snapshot(&self) -> HashMap<DateKey, Arc<Day>> {
        self.lock().days.clone()
    }

    /// Events matching `query`; an uncached date yields nothing.
    pub fn query(&self, query: &EventQuery) -> Vec<Event> {
        let inner = self.lock();
        query::select_from(&inner.days, self.default_date, query)
    }

    /// Events of one category (or all when `None`) for `date` (or the
    /// default date), filtered by `search_text`.
    pub fn data_for(
        &self,
        event_type: Option<EventType>,
        date: Option<DateKey>,
        search_text: &str,
    ) -> Vec<Event> {
        self.query(&EventQuery {
            event_type,
            date,
            search: search_text.to_string(),
        })
    }

    /// Number of events in one category for `date` (or the default date).
    /// Zero when that date is not cached; never fetches.
    pub fn count_for(&self, event_type: EventType, date: Option<DateKey>) -> usize {
        self.totals_for(date).get(event_type)
    }

    /// Counts for all categories of `date` (or the default date).
    pub fn totals_for(&self, date: Option<DateKey>) -> CategoryTotals {
        let key = date.unwrap_or(self.default_date);
        self.lock()
            .days
            .get(&key)
            .map(|day| query::totals(day))
            .unwrap_or_default()
    }
}

/// Releases one waiter on drop, so the loading flag is reset on success,
/// failure and cancellation alike.
struct WaiterGuard<'a> {
    state: &'a AppState,
    key: DateKey,
}

impl Drop for WaiterGuard<'_> {
    fn drop(&mut self) {
        self.state.release(self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StaticSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl DaySource for StaticSource {
        async fn fetch_day(&self, month: u32, day: u32) -> Result<Day> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut data = HashMap::new();
            data.insert(EventType::Events, vec![Event::new("1969", "Moon", vec![])]);
            let label = DateKey::new(month, day).to_string().replace(' ', "_");
            Ok(Day::new(label, data))
        }
    }

    fn state() -> (Arc<StaticSource>, AppState) {
        let source = Arc::new(StaticSource {
            calls: AtomicUsize::new(0),
        });
        let state = AppState::new(source.clone()).with_default_date(DateKey::new(9, 25));
        (source, state)
    }

    #[tokio::test]
    async fn test_second_call_is_served_from_cache() {
        let (source, state) = state();
        let first = state.get_or_fetch(9, 25).await.unwrap();
        let second = state.get_or_fetch(9, 25).await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert!(!state.is_loading());
    }

    #[tokio::test]
    async fn test_default_date_resolution() {
        let (_, state) = state();
        assert_eq!(state.count_for(EventType::Events, None), 0);
        state.load_default().await.unwrap();
        assert_eq!(state.count_for(EventType::Events, None), 1);
        assert_eq!(state.data_for(None, None, "moon").len(), 1);
        assert_eq!(state.cached_dates(), vec![DateKey::new(9, 25)]);
    }

    #[tokio::test]
    async fn test_shutdown_refuses_new_fetches() {
        let (source, state) = state();
        state.shutdown();
        let err = state.get_or_fetch(1, 1).await.unwrap_err();
        assert_eq!(err, OnThisDayError::Cancelled);
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
        assert!(state.is_closed());
    }
}
