//! Integration tests for the query cache: deduplication,
//! stale-while-revalidate, error isolation, polling teardown, and the
//! end-to-end watch flows the high-level client builds on.

use paprika_sdk::error::SdkError;
use paprika_sdk::query::{FetchFn, QueryCache, QueryKey, QueryOptions, QuerySnapshot};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio_test::assert_ok;

/// Fetch that counts invocations and waits for one `gate` permit per call
/// before resolving, so tests control exactly when each fetch completes.
fn gated_fetch(calls: Arc<AtomicUsize>, gate: Arc<Semaphore>, results: Vec<Result<Value, String>>) -> FetchFn {
    Arc::new(move || {
        let call = calls.fetch_add(1, Ordering::SeqCst);
        let gate = gate.clone();
        let result = results
            .get(call.min(results.len().saturating_sub(1)))
            .cloned()
            .unwrap_or(Ok(json!(null)));
        Box::pin(async move {
            let permit = gate.acquire().await.map_err(|e| SdkError::Other(e.to_string()))?;
            permit.forget();
            result.map_err(SdkError::Other)
        })
    })
}

async fn wait_for(cache: &Arc<QueryCache>, key: &QueryKey, pred: impl Fn(&QuerySnapshot) -> bool) -> QuerySnapshot {
    for _ in 0..400 {
        let snap = cache.snapshot(key);
        if pred(&snap) {
            return snap;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("condition not reached for {key}");
}

#[tokio::test]
async fn test_concurrent_subscribers_share_one_fetch() {
    let cache = QueryCache::new();
    let key = QueryKey::bare("coins");
    let calls = Arc::new(AtomicUsize::new(0));
    let gate = Arc::new(Semaphore::new(0));
    let fetch = gated_fetch(calls.clone(), gate.clone(), vec![Ok(json!([{"id": "btc-bitcoin"}]))]);

    let subs: Vec<_> = (0..3)
        .map(|_| cache.subscribe(key.clone(), fetch.clone(), QueryOptions::default(), |_| {}))
        .collect();

    // All three subscribed while the single fetch is still in flight.
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    gate.add_permits(1);
    let snap = wait_for(&cache, &key, |s| s.data.is_some()).await;
    assert!(!snap.is_loading);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    for sub in subs {
        sub.unsubscribe();
    }
}

#[tokio::test]
async fn test_completion_notifies_every_subscriber_once_with_one_snapshot() {
    let cache = QueryCache::new();
    let key = QueryKey::new("tickers", "btc-bitcoin");
    let gate = Arc::new(Semaphore::new(0));
    let fetch = gated_fetch(
        Arc::new(AtomicUsize::new(0)),
        gate.clone(),
        vec![Ok(json!({"price": 50000})), Err("boom".to_string())],
    );

    let mut rxs = Vec::new();
    let subs: Vec<_> = (0..3)
        .map(|_| {
            let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
            rxs.push(rx);
            cache.subscribe(key.clone(), fetch.clone(), QueryOptions::default(), move |snap| {
                let _ = tx.send(snap);
            })
        })
        .collect();

    gate.add_permits(1);
    wait_for(&cache, &key, |s| s.data.is_some()).await;
    tokio::time::sleep(Duration::from_millis(20)).await;

    // Every subscriber sees exactly one completion, and all three carry the
    // same payload (not three per-subscriber reads of cache state).
    let mut payloads = Vec::new();
    for rx in &mut rxs {
        let mut completions = 0;
        while let Ok(snap) = rx.try_recv() {
            if let Some(data) = snap.data {
                completions += 1;
                payloads.push(data);
            }
        }
        assert_eq!(completions, 1);
    }
    assert_eq!(payloads.len(), 3);
    assert!(payloads.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));

    // Error transitions are broadcast the same way.
    gate.add_permits(1);
    cache.invalidate(&key);
    wait_for(&cache, &key, |s| s.error.is_some()).await;
    tokio::time::sleep(Duration::from_millis(20)).await;

    let mut errors = Vec::new();
    for rx in &mut rxs {
        let mut failures = 0;
        while let Ok(snap) = rx.try_recv() {
            if let Some(err) = snap.error {
                failures += 1;
                errors.push(err);
            }
        }
        assert_eq!(failures, 1, "error completion must reach every subscriber once");
    }
    assert!(errors.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));

    for sub in subs {
        sub.unsubscribe();
    }
}

#[tokio::test]
async fn test_revalidation_keeps_serving_stale_data() {
    let cache = QueryCache::new();
    let key = QueryKey::new("tickers", "btc-bitcoin");
    let calls = Arc::new(AtomicUsize::new(0));
    let gate = Arc::new(Semaphore::new(1));
    let fetch = gated_fetch(
        calls.clone(),
        gate.clone(),
        vec![Ok(json!({"price": 50000})), Ok(json!({"price": 51000}))],
    );

    let sub = cache.subscribe(key.clone(), fetch, QueryOptions::default(), |_| {});
    wait_for(&cache, &key, |s| s.data.is_some()).await;

    // Second fetch in flight (gate empty, so it cannot finish yet).
    cache.invalidate(&key);
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(calls.load(Ordering::SeqCst), 2);

    let snap = cache.snapshot(&key);
    assert!(!snap.is_loading, "stale data suppresses the loading state");
    assert_eq!(snap.data.unwrap().as_ref(), &json!({"price": 50000}));

    gate.add_permits(1);
    let snap = wait_for(&cache, &key, |s| {
        s.data.as_deref() == Some(&json!({"price": 51000}))
    })
    .await;
    assert!(snap.error.is_none());
    sub.unsubscribe();
}

#[tokio::test]
async fn test_failed_refetch_preserves_data_and_records_error() {
    let cache = QueryCache::new();
    let key = QueryKey::new("info", "eth-ethereum");
    let calls = Arc::new(AtomicUsize::new(0));
    let gate = Arc::new(Semaphore::new(2));
    let fetch = gated_fetch(
        calls.clone(),
        gate,
        vec![Ok(json!({"rank": 2})), Err("boom".to_string())],
    );

    let sub = cache.subscribe(key.clone(), fetch, QueryOptions::default(), |_| {});
    wait_for(&cache, &key, |s| s.data.is_some()).await;

    cache.invalidate(&key);
    let snap = wait_for(&cache, &key, |s| s.error.is_some()).await;
    assert_eq!(snap.data.unwrap().as_ref(), &json!({"rank": 2}));
    assert!(!snap.is_loading);

    // The next successful fetch clears the error again.
    cache.invalidate(&key);
    let snap = wait_for(&cache, &key, |s| s.error.is_none()).await;
    assert!(snap.data.is_some());
    sub.unsubscribe();
}

#[tokio::test]
async fn test_unsubscribe_stops_polling() {
    let cache = QueryCache::new();
    let key = QueryKey::new("ohlcv", "btc-bitcoin");
    let calls = Arc::new(AtomicUsize::new(0));
    let gate = Arc::new(Semaphore::new(1000));
    let fetch = gated_fetch(calls.clone(), gate, vec![Ok(json!([]))]);

    let sub = cache.subscribe(
        key.clone(),
        fetch,
        QueryOptions::polled(Duration::from_millis(25)),
        |_| {},
    );
    for _ in 0..400 {
        if calls.load(Ordering::SeqCst) >= 3 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    assert!(calls.load(Ordering::SeqCst) >= 3);

    sub.unsubscribe();
    tokio::time::sleep(Duration::from_millis(50)).await;
    let settled = calls.load(Ordering::SeqCst);
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(calls.load(Ordering::SeqCst), settled);

    // Data survives teardown for instant redisplay.
    assert!(cache.snapshot(&key).data.is_some());
}

#[tokio::test]
async fn test_same_name_different_params_are_isolated() {
    let cache = QueryCache::new();
    let btc = QueryKey::new("ohlcv", "btc-bitcoin");
    let eth = QueryKey::new("ohlcv", "eth-ethereum");
    let btc_calls = Arc::new(AtomicUsize::new(0));
    let eth_calls = Arc::new(AtomicUsize::new(0));
    let gate = Arc::new(Semaphore::new(1000));

    let sub_btc = cache.subscribe(
        btc.clone(),
        gated_fetch(btc_calls.clone(), gate.clone(), vec![Ok(json!("btc"))]),
        QueryOptions::default(),
        |_| {},
    );
    let sub_eth = cache.subscribe(
        eth.clone(),
        gated_fetch(eth_calls.clone(), gate, vec![Ok(json!("eth"))]),
        QueryOptions::default(),
        |_| {},
    );

    wait_for(&cache, &btc, |s| s.data.is_some()).await;
    wait_for(&cache, &eth, |s| s.data.is_some()).await;
    assert_eq!(cache.snapshot(&btc).data.unwrap().as_ref(), &json!("btc"));
    assert_eq!(cache.snapshot(&eth).data.unwrap().as_ref(), &json!("eth"));
    assert_eq!(btc_calls.load(Ordering::SeqCst), 1);
    assert_eq!(eth_calls.load(Ordering::SeqCst), 1);

    cache.invalidate(&btc);
    wait_for(&cache, &btc, |s| !s.is_loading).await;
    for _ in 0..100 {
        if btc_calls.load(Ordering::SeqCst) == 2 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    assert_eq!(btc_calls.load(Ordering::SeqCst), 2);
    assert_eq!(eth_calls.load(Ordering::SeqCst), 1, "invalidation must not leak across params");

    sub_btc.unsubscribe();
    sub_eth.unsubscribe();
}

#[tokio::test]
async fn test_ticker_watch_transitions_loading_then_data() {
    let cache = QueryCache::new();
    let key = QueryKey::new("tickers", "btc-bitcoin");
    let gate = Arc::new(Semaphore::new(0));
    let fetch = gated_fetch(
        Arc::new(AtomicUsize::new(0)),
        gate.clone(),
        vec![Ok(json!({"quotes": {"USD": {"price": 50000}}}))],
    );

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let sub = cache.subscribe(key.clone(), fetch, QueryOptions::default(), move |snap| {
        let _ = tx.send(snap);
    });

    // First notification: loading, no data yet.
    let first = rx.recv().await.unwrap();
    assert!(first.is_loading);
    assert!(first.data.is_none());

    gate.add_permits(1);
    let second = rx.recv().await.unwrap();
    assert!(!second.is_loading);
    let price = second.data.as_ref().unwrap()["quotes"]["USD"]["price"].clone();
    assert_eq!(price, json!(50000));

    // Typed decode of the cached payload.
    #[derive(serde::Deserialize)]
    struct Quotes {
        quotes: serde_json::Map<String, Value>,
    }
    let decoded = assert_ok!(second.decode::<Quotes>());
    assert!(decoded.unwrap().quotes.contains_key("USD"));
    sub.unsubscribe();
}

#[tokio::test]
async fn test_polled_watch_survives_a_failing_tick() {
    let cache = QueryCache::new();
    let key = QueryKey::new("info", "eth-ethereum");
    let calls = Arc::new(AtomicUsize::new(0));
    let gate = Arc::new(Semaphore::new(1000));
    let fetch = gated_fetch(
        calls.clone(),
        gate,
        vec![
            Ok(json!({"name": "Ethereum"})),
            Err("upstream hiccup".to_string()),
            Ok(json!({"name": "Ethereum"})),
        ],
    );

    let sub = cache.subscribe(
        key.clone(),
        fetch,
        QueryOptions::polled(Duration::from_millis(25)),
        |_| {},
    );

    let snap = wait_for(&cache, &key, |s| s.error.is_some()).await;
    assert_eq!(snap.data.unwrap().as_ref(), &json!({"name": "Ethereum"}));

    // The next tick succeeds and clears the error; polling never stopped.
    let snap = wait_for(&cache, &key, |s| s.error.is_none() && s.data.is_some()).await;
    assert!(!snap.is_loading);
    assert!(calls.load(Ordering::SeqCst) >= 3);
    sub.unsubscribe();
}
