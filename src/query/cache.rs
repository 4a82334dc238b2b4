//! The query cache — entries, subscriptions, fetch coordination.
//!
//! `QueryCache` maps [`QueryKey`] → entry. Every entry holds the latest
//! successful payload, the loading/error status, the subscriber callback
//! list, and (while subscribers remain) an optional poll timer task.
//!
//! All entry transitions happen under one short-lived mutex that is never
//! held across an `.await`; fetches and poll timers run as spawned tokio
//! tasks whose completions re-acquire the lock. Subscriber callbacks are
//! always invoked after the lock is released.

use crate::error::SdkError;
use crate::query::QueryKey;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;

/// Boxed future produced by a fetch closure.
pub type FetchFuture = Pin<Box<dyn Future<Output = Result<Value, SdkError>> + Send>>;

/// A zero-argument fetch closure producing a JSON result.
pub type FetchFn = Arc<dyn Fn() -> FetchFuture + Send + Sync>;

type ChangeFn = Arc<dyn Fn(QuerySnapshot) + Send + Sync>;

// ─── Options ─────────────────────────────────────────────────────────────────

/// Per-subscription options.
#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    /// Periodic background refetch while this subscriber is held.
    ///
    /// The entry polls at the minimum interval over its active subscribers.
    /// A zero interval is treated as no polling.
    pub refetch_interval: Option<Duration>,
}

impl QueryOptions {
    pub fn polled(interval: Duration) -> Self {
        Self {
            refetch_interval: Some(interval),
        }
    }
}

// ─── Snapshot ────────────────────────────────────────────────────────────────

/// Derived view state for one query key.
///
/// `is_loading` is suppressed once stale data exists: a revalidating entry
/// keeps showing its last good payload instead of a loading state.
#[derive(Debug, Clone, Default)]
pub struct QuerySnapshot {
    pub is_loading: bool,
    pub data: Option<Arc<Value>>,
    pub error: Option<Arc<SdkError>>,
}

impl QuerySnapshot {
    /// The snapshot of a key the cache has never seen.
    pub fn idle() -> Self {
        Self::default()
    }

    /// Deserialize the cached payload into a typed value.
    ///
    /// Returns `Ok(None)` while no data is cached.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<Option<T>, SdkError> {
        match &self.data {
            Some(value) => Ok(Some(serde_json::from_value(value.as_ref().clone())?)),
            None => Ok(None),
        }
    }
}

// ─── Entry internals ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QueryStatus {
    Idle,
    Loading,
    Success,
    Error,
}

struct Subscriber {
    id: u64,
    refetch_interval: Option<Duration>,
    on_change: ChangeFn,
}

struct QueryEntry {
    status: QueryStatus,
    data: Option<Arc<Value>>,
    error: Option<Arc<SdkError>>,
    last_fetched_at: Option<Instant>,
    invalidated: bool,
    fetch: FetchFn,
    subscribers: Vec<Subscriber>,
    timer: Option<JoinHandle<()>>,
}

impl QueryEntry {
    fn new(fetch: FetchFn) -> Self {
        Self {
            status: QueryStatus::Idle,
            data: None,
            error: None,
            last_fetched_at: None,
            invalidated: false,
            fetch,
            subscribers: Vec::new(),
            timer: None,
        }
    }

    fn snapshot(&self) -> QuerySnapshot {
        QuerySnapshot {
            is_loading: self.status == QueryStatus::Loading && self.data.is_none(),
            data: self.data.clone(),
            error: self.error.clone(),
        }
    }

    fn callbacks(&self) -> Vec<ChangeFn> {
        self.subscribers.iter().map(|s| s.on_change.clone()).collect()
    }

    /// Minimum refetch interval over active subscribers, if any. Zero
    /// intervals are ignored; they would busy-loop the trigger path.
    fn effective_interval(&self) -> Option<Duration> {
        self.subscribers
            .iter()
            .filter_map(|s| s.refetch_interval)
            .filter(|interval| !interval.is_zero())
            .min()
    }

    fn cancel_timer(&mut self) {
        if let Some(handle) = self.timer.take() {
            handle.abort();
        }
    }
}

impl Drop for QueryEntry {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}

// ─── Cache ───────────────────────────────────────────────────────────────────

/// In-memory store mapping [`QueryKey`] → cached entry.
///
/// Multiple subscribers to the same key share one fetch and one result: a
/// trigger while a fetch is already in flight is a no-op. Entries whose last
/// subscriber has left keep their data (instant redisplay on resubscribe)
/// but their poll timer is canceled.
pub struct QueryCache {
    entries: Mutex<HashMap<QueryKey, QueryEntry>>,
    next_subscriber_id: AtomicU64,
}

impl QueryCache {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            entries: Mutex::new(HashMap::new()),
            next_subscriber_id: AtomicU64::new(1),
        })
    }

    /// Subscribe to a query key.
    ///
    /// Increments the entry's subscriber count and registers `on_change`,
    /// which fires once per status/data transition (batched: every
    /// subscriber of the key sees the same snapshot). If the entry is new,
    /// has no successful data yet, or was invalidated, a fetch is triggered
    /// immediately; otherwise the new subscriber's callback is invoked once
    /// with the cached snapshot before this call returns.
    ///
    /// Must be called from within a tokio runtime. Dropping the returned
    /// handle (or calling [`QuerySubscription::unsubscribe`]) releases the
    /// subscription.
    pub fn subscribe(
        self: &Arc<Self>,
        key: QueryKey,
        fetch: FetchFn,
        options: QueryOptions,
        on_change: impl Fn(QuerySnapshot) + Send + Sync + 'static,
    ) -> QuerySubscription {
        let id = self.next_subscriber_id.fetch_add(1, Ordering::Relaxed);
        let on_change: ChangeFn = Arc::new(on_change);

        let mut needs_fetch = false;
        let mut initial: Option<(QuerySnapshot, ChangeFn)> = None;
        {
            let mut entries = self.lock();
            let entry = entries
                .entry(key.clone())
                .or_insert_with(|| QueryEntry::new(fetch.clone()));
            // Latest fetch closure wins; polls and invalidations use it.
            entry.fetch = fetch;
            entry.subscribers.push(Subscriber {
                id,
                refetch_interval: options.refetch_interval,
                on_change: on_change.clone(),
            });

            if entry.data.is_none() || entry.invalidated {
                needs_fetch = true;
            } else {
                initial = Some((entry.snapshot(), on_change));
                if entry.status != QueryStatus::Loading {
                    // A new subscriber may shorten (or introduce) the poll
                    // interval; recompute from the last completed fetch.
                    self.schedule_locked(&key, entry);
                }
            }
        }

        if needs_fetch {
            self.trigger(&key);
        }
        if let Some((snapshot, cb)) = initial {
            cb(snapshot);
        }

        QuerySubscription {
            cache: Arc::downgrade(self),
            key,
            id,
        }
    }

    /// Current derived state for a key. Unknown keys read as idle.
    pub fn snapshot(&self, key: &QueryKey) -> QuerySnapshot {
        self.lock()
            .get(key)
            .map(QueryEntry::snapshot)
            .unwrap_or_else(QuerySnapshot::idle)
    }

    /// Force a refetch regardless of cached state.
    ///
    /// With active subscribers the fetch starts immediately (deduplicated
    /// against any in-flight one); without subscribers the entry is marked
    /// so the next subscription refetches. Unknown keys are a no-op.
    pub fn invalidate(self: &Arc<Self>, key: &QueryKey) {
        {
            let mut entries = self.lock();
            let Some(entry) = entries.get_mut(key) else {
                return;
            };
            if entry.subscribers.is_empty() {
                entry.invalidated = true;
                return;
            }
        }
        self.trigger(key);
    }

    /// Drop every entry, canceling all poll timers.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Number of cached entries (subscribed or retained).
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // ── Fetch coordination ───────────────────────────────────────────────

    /// Start a fetch for `key` unless one is already in flight.
    fn trigger(self: &Arc<Self>, key: &QueryKey) {
        let (snapshot, callbacks, fetch) = {
            let mut entries = self.lock();
            let Some(entry) = entries.get_mut(key) else {
                return;
            };
            if entry.status == QueryStatus::Loading {
                tracing::debug!(%key, "fetch already in flight, coalescing");
                return;
            }
            entry.status = QueryStatus::Loading;
            entry.invalidated = false;
            (entry.snapshot(), entry.callbacks(), entry.fetch.clone())
        };

        tracing::debug!(%key, "fetch started");
        notify(&callbacks, snapshot);

        let cache = Arc::downgrade(self);
        let key = key.clone();
        tokio::spawn(async move {
            let result = fetch().await;
            if let Some(cache) = cache.upgrade() {
                cache.complete(&key, result);
            }
        });
    }

    /// Store a fetch result and notify subscribers of the key.
    ///
    /// A result arriving after the last unsubscribe is still stored for
    /// future subscribers; it is simply delivered to no one.
    fn complete(self: &Arc<Self>, key: &QueryKey, result: Result<Value, SdkError>) {
        let (snapshot, callbacks) = {
            let mut entries = self.lock();
            let Some(entry) = entries.get_mut(key) else {
                return;
            };
            match result {
                Ok(value) => {
                    entry.data = Some(Arc::new(value));
                    entry.error = None;
                    entry.status = QueryStatus::Success;
                }
                Err(err) => {
                    // Errors never clear previously good data.
                    tracing::warn!(%key, error = %err, "fetch failed");
                    entry.error = Some(Arc::new(err));
                    entry.status = QueryStatus::Error;
                }
            }
            entry.last_fetched_at = Some(Instant::now());
            self.schedule_locked(key, entry);
            (entry.snapshot(), entry.callbacks())
        };

        notify(&callbacks, snapshot);
    }

    /// (Re)arm the poll timer for an entry: next trigger fires at
    /// `last_fetched_at + interval`, where the interval is the minimum over
    /// active subscribers. Clears any previous timer; entries without
    /// subscribers or without an interval end up with no timer.
    fn schedule_locked(self: &Arc<Self>, key: &QueryKey, entry: &mut QueryEntry) {
        entry.cancel_timer();
        let Some(interval) = entry.effective_interval() else {
            return;
        };
        if entry.subscribers.is_empty() {
            return;
        }

        let elapsed = entry
            .last_fetched_at
            .map(|at| at.elapsed())
            .unwrap_or_default();
        let delay = interval.saturating_sub(elapsed);

        let cache = Arc::downgrade(self);
        let key = key.clone();
        entry.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(cache) = cache.upgrade() {
                tracing::debug!(%key, "poll tick");
                cache.trigger(&key);
            }
        }));
    }

    /// Remove one subscriber; cancels the poll timer when it was the last.
    fn release(self: &Arc<Self>, key: &QueryKey, id: u64) {
        let mut entries = self.lock();
        let Some(entry) = entries.get_mut(key) else {
            return;
        };
        entry.subscribers.retain(|s| s.id != id);
        if entry.subscribers.is_empty() {
            entry.cancel_timer();
            tracing::debug!(%key, "last subscriber gone, polling stopped");
        } else if entry.status != QueryStatus::Loading {
            // The departed subscriber may have held the shortest interval.
            self.schedule_locked(key, entry);
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<QueryKey, QueryEntry>> {
        // Callbacks run outside the lock, so a poisoned map still holds a
        // consistent state; recover rather than propagate the panic.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Invoke every callback with the same snapshot — one batched notification
/// per transition, not one fetch of state per subscriber.
fn notify(callbacks: &[ChangeFn], snapshot: QuerySnapshot) {
    for cb in callbacks {
        cb(snapshot.clone());
    }
}

// ─── Subscription handle ─────────────────────────────────────────────────────

/// Handle owning one subscription to a query key.
///
/// Releasing it — explicitly via [`unsubscribe`](Self::unsubscribe) or by
/// dropping — decrements the entry's subscriber count and, when it was the
/// last subscriber, cancels the entry's poll timer.
#[must_use = "dropping the handle unsubscribes immediately"]
pub struct QuerySubscription {
    cache: Weak<QueryCache>,
    key: QueryKey,
    id: u64,
}

impl QuerySubscription {
    pub fn key(&self) -> &QueryKey {
        &self.key
    }

    /// Release the subscription now.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for QuerySubscription {
    fn drop(&mut self) {
        if let Some(cache) = self.cache.upgrade() {
            cache.release(&self.key, self.id);
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
