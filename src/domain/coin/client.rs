//! Coins sub-client — listing, static info, cache-backed watches.

use crate::client::PaprikaClient;
use crate::domain::coin::{self, Coin, CoinInfo};
use crate::error::SdkError;
use crate::query::{FetchFn, QueryKey, QueryOptions, QuerySnapshot, QuerySubscription};
use crate::shared::CoinId;
use std::sync::Arc;

/// Query name for the global coin list.
pub const QUERY_COINS: &str = "coins";

/// Query name for per-coin static info.
pub const QUERY_INFO: &str = "info";

/// How many list entries consumers conventionally display.
pub const LIST_DISPLAY_LIMIT: usize = 100;

/// Sub-client for coin operations.
pub struct Coins<'a> {
    pub(crate) client: &'a PaprikaClient,
}

impl<'a> Coins<'a> {
    /// Fetch and validate the full coin list.
    pub async fn list(&self) -> Result<Vec<Coin>, SdkError> {
        let resp = self.client.http.get_coins().await?;
        resp.into_iter()
            .map(|c| {
                c.try_into()
                    .map_err(|e: coin::ValidationError| SdkError::Validation(e.to_string()))
            })
            .collect()
    }

    /// Fetch static metadata for one coin.
    pub async fn info(&self, coin_id: &CoinId) -> Result<CoinInfo, SdkError> {
        let resp = self.client.http.get_coin_info(coin_id).await?;
        resp.try_into()
            .map_err(|e: coin::ValidationError| SdkError::Validation(e.to_string()))
    }

    /// Watch the coin list through the query cache. Fetched once per cache
    /// lifetime; no polling.
    pub fn watch_list(
        &self,
        on_change: impl Fn(QuerySnapshot) + Send + Sync + 'static,
    ) -> QuerySubscription {
        let http = self.client.http.clone();
        let fetch: FetchFn = Arc::new(move || {
            let http = http.clone();
            Box::pin(async move {
                let resp = http.get_coins().await?;
                Ok(serde_json::to_value(resp)?)
            })
        });
        self.client
            .queries
            .subscribe(QueryKey::bare(QUERY_COINS), fetch, QueryOptions::default(), on_change)
    }

    /// Watch one coin's static info, polled at the client's info interval
    /// (default 10 s) while the subscription is held.
    pub fn watch_info(
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
                let resp = http.get_coin_info(&id).await?;
                Ok(serde_json::to_value(resp)?)
            })
        });
        let options = QueryOptions {
            refetch_interval: self.client.info_refetch_interval,
        };
        self.client.queries.subscribe(
            QueryKey::new(QUERY_INFO, coin_id.as_str()),
            fetch,
            options,
            on_change,
        )
    }

    /// Invalidate the cached list, forcing a refetch.
    pub fn invalidate_list(&self) {
        self.client.queries.invalidate(&QueryKey::bare(QUERY_COINS));
    }

    /// Invalidate one coin's cached info.
    pub fn invalidate_info(&self, coin_id: &CoinId) {
        self.client
            .queries
            .invalidate(&QueryKey::new(QUERY_INFO, coin_id.as_str()));
    }
}
