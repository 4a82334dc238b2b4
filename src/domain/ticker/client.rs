//! Tickers sub-client — live USD quotes.

use crate::client::PaprikaClient;
use crate::domain::ticker::{self, Ticker};
use crate::error::SdkError;
use crate::query::{FetchFn, QueryKey, QueryOptions, QuerySnapshot, QuerySubscription};
use crate::shared::CoinId;
use std::sync::Arc;

/// Query name for per-coin tickers.
pub const QUERY_TICKERS: &str = "tickers";

/// Sub-client for ticker operations.
pub struct Tickers<'a> {
    pub(crate) client: &'a PaprikaClient,
}

impl<'a> Tickers<'a> {
    /// Fetch and validate the live ticker for one coin.
    pub async fn get(&self, coin_id: &CoinId) -> Result<Ticker, SdkError> {
        let resp = self.client.http.get_coin_tickers(coin_id).await?;
        resp.try_into()
            .map_err(|e: ticker::ValidationError| SdkError::Validation(e.to_string()))
    }

    /// Watch one coin's ticker through the query cache. Fetched once per
    /// cache lifetime; refresh with [`invalidate`](Self::invalidate).
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
                let resp = http.get_coin_tickers(&id).await?;
                Ok(serde_json::to_value(resp)?)
            })
        });
        self.client.queries.subscribe(
            QueryKey::new(QUERY_TICKERS, coin_id.as_str()),
            fetch,
            QueryOptions::default(),
            on_change,
        )
    }

    /// Invalidate one coin's cached ticker.
    pub fn invalidate(&self, coin_id: &CoinId) {
        self.client
            .queries
            .invalidate(&QueryKey::new(QUERY_TICKERS, coin_id.as_str()));
    }
}
