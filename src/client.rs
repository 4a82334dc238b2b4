//! High-level client wiring the HTTP layer into the query cache.

use crate::domain::coin::client::Coins;
use crate::domain::ohlcv::client::Ohlcv;
use crate::domain::ticker::client::Tickers;
use crate::error::SdkError;
use crate::http::PaprikaHttp;
use crate::network::DEFAULT_API_URL;
use crate::query::QueryCache;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub use crate::domain::coin::client::Coins as CoinsClient;
pub use crate::domain::ohlcv::client::Ohlcv as OhlcvClient;
pub use crate::domain::ticker::client::Tickers as TickersClient;

/// Default poll cadence for watched coin metadata.
pub const DEFAULT_INFO_REFETCH: Duration = Duration::from_secs(10);

/// Default poll cadence for watched candle history.
pub const DEFAULT_HISTORY_REFETCH: Duration = Duration::from_secs(100);

/// Primary entry point: owns the HTTP client and the query cache, and hands
/// out borrowed sub-clients per domain.
///
/// Cloning is cheap; clones share the same underlying cache and connection
/// pool.
#[derive(Clone)]
pub struct PaprikaClient {
    pub(crate) http: PaprikaHttp,
    pub(crate) queries: Arc<QueryCache>,
    pub(crate) info_refetch_interval: Option<Duration>,
    pub(crate) history_refetch_interval: Option<Duration>,
}

impl PaprikaClient {
    /// Create a client against the public API with default poll cadences.
    pub fn new() -> Result<Self, SdkError> {
        Self::builder().build()
    }

    pub fn builder() -> PaprikaClientBuilder {
        PaprikaClientBuilder::default()
    }

    /// Sub-client for coin listings and metadata.
    pub fn coins(&self) -> Coins<'_> {
        Coins { client: self }
    }

    /// Sub-client for live USD quotes.
    pub fn tickers(&self) -> Tickers<'_> {
        Tickers { client: self }
    }

    /// Sub-client for historical candles.
    pub fn ohlcv(&self) -> Ohlcv<'_> {
        Ohlcv { client: self }
    }

    /// Direct access to the underlying query cache.
    pub fn queries(&self) -> &Arc<QueryCache> {
        &self.queries
    }

    /// Drop every cached query entry and stop all polling.
    pub fn clear_cache(&self) {
        self.queries.clear();
    }
}

/// Builder for [`PaprikaClient`].
///
/// ```rust,ignore
/// let client = PaprikaClient::builder()
///     .info_refetch_interval(None)   // disable metadata polling
///     .build()?;
/// ```
pub struct PaprikaClientBuilder {
    base_url: String,
    info_refetch_interval: Option<Duration>,
    history_refetch_interval: Option<Duration>,
}

impl Default for PaprikaClientBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            info_refetch_interval: Some(DEFAULT_INFO_REFETCH),
            history_refetch_interval: Some(DEFAULT_HISTORY_REFETCH),
        }
    }
}

impl PaprikaClientBuilder {
    /// Override the API base URL (e.g. a local mock server in tests).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Poll cadence for watched coin metadata. `None` disables polling.
    pub fn info_refetch_interval(mut self, interval: Option<Duration>) -> Self {
        self.info_refetch_interval = interval;
        self
    }

    /// Poll cadence for watched candle history. `None` disables polling.
    pub fn history_refetch_interval(mut self, interval: Option<Duration>) -> Self {
        self.history_refetch_interval = interval;
        self
    }

    pub fn build(self) -> Result<PaprikaClient, SdkError> {
        debug!(base_url = %self.base_url, "Building Paprika client");
        Ok(PaprikaClient {
            http: PaprikaHttp::new(&self.base_url),
            queries: QueryCache::new(),
            info_refetch_interval: self.info_refetch_interval,
            history_refetch_interval: self.history_refetch_interval,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let client = PaprikaClient::builder().build().unwrap();
        assert_eq!(client.info_refetch_interval, Some(DEFAULT_INFO_REFETCH));
        assert_eq!(
            client.history_refetch_interval,
            Some(DEFAULT_HISTORY_REFETCH)
        );
        assert!(client.queries().is_empty());
    }

    #[test]
    fn test_builder_disables_polling() {
        let client = PaprikaClient::builder()
            .info_refetch_interval(None)
            .history_refetch_interval(None)
            .build()
            .unwrap();
        assert_eq!(client.info_refetch_interval, None);
        assert_eq!(client.history_refetch_interval, None);
    }

    #[test]
    fn test_clones_share_cache() {
        let client = PaprikaClient::new().unwrap();
        let clone = client.clone();
        assert!(Arc::ptr_eq(client.queries(), clone.queries()));
    }
}
