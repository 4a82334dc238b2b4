//! OHLCV sub-client — historical candle retrieval and watching.

use crate::client::PaprikaClient;
use crate::domain::ohlcv::{Candle, ValidationError};
use crate::error::SdkError;
use crate::query::{FetchFn, QueryKey, QueryOptions, QuerySnapshot, QuerySubscription};
use crate::shared::CoinId;
use std::sync::Arc;
use std::time::Duration;

/// Query name for per-coin candle history.
pub const QUERY_OHLCV: &str = "ohlcv";

/// Default lookback for [`Ohlcv::history`] and watched queries.
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(14 * 24 * 60 * 60);

/// Sub-client for OHLCV operations.
pub struct Ohlcv<'a> {
    pub(crate) client: &'a PaprikaClient,
}

impl<'a> Ohlcv<'a> {
    /// Fetch the last two weeks of daily candles for one coin.
    pub async fn history(&self, coin_id: &CoinId) -> Result<Vec<Candle>, SdkError> {
        let (start, end) = default_window();
        self.history_range(coin_id, start, end).await
    }

    /// Fetch daily candles for one coin over an explicit unix-seconds range.
    pub async fn history_range(
        &self,
        coin_id: &CoinId,
        start: u64,
        end: u64,
    ) -> Result<Vec<Candle>, SdkError> {
        let resp = self
            .client
            .http
            .get_coin_history(coin_id, Some(start), Some(end))
            .await?;
        resp.into_iter()
            .map(|c| {
                c.try_into()
                    .map_err(|e: ValidationError| SdkError::Validation(e.to_string()))
            })
            .collect()
    }

    /// Watch one coin's candle history through the query cache, polled at the
    /// client's history cadence. The two-week window is recomputed on every
    /// fetch, so long-lived watches keep sliding forward.
    pub fn watch(
        &self,
        coin_id: &CoinId,
        on_change: impl Fn(QuerySnapshot) + Send + Sync + 'static,
    ) -> QuerySubscription {
        let http = self.client.http.clone();
        let id = coin_id.clone();
        let fetch: FetchFn = Arc::new(move || {
            let http = http.clone();
            let id = id.clone();
            Box::pin(async move {
                let (start, end) = default_window();
                let resp = http.get_coin_history(&id, Some(start), Some(end)).await?;
                Ok(serde_json::to_value(resp)?)
            })
        });
        self.client.queries.subscribe(
            QueryKey::new(QUERY_OHLCV, coin_id.as_str()),
            fetch,
            QueryOptions {
                refetch_interval: self.client.history_refetch_interval,
            },
            on_change,
        )
    }

    /// Invalidate one coin's cached candle history.
    pub fn invalidate(&self, coin_id: &CoinId) {
        self.client
            .queries
            .invalidate(&QueryKey::new(QUERY_OHLCV, coin_id.as_str()));
    }
}

/// Unix-seconds `(start, end)` pair covering the trailing default window.
fn default_window() -> (u64, u64) {
    let end = chrono::Utc::now().timestamp().max(0) as u64;
    let start = end.saturating_sub(DEFAULT_WINDOW.as_secs());
    (start, end)
}
