//! Low-level HTTP client — `PaprikaHttp`.
//!
//! One method per API endpoint. Returns wire types (conversion to domain
//! types happens at the sub-client boundary). All endpoints are read-only
//! GETs with no authentication; failures are reported, never retried here —
//! revalidation cadence belongs to the query cache.

use crate::domain::coin::wire::{CoinInfoResponse, CoinResponse};
use crate::domain::ohlcv::wire::CandleResponse;
use crate::domain::ticker::wire::TickerResponse;
use crate::error::{HttpError, SdkError};
use crate::shared::CoinId;

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Low-level HTTP client for the Coinpaprika REST API.
pub struct PaprikaHttp {
    base_url: String,
    client: Client,
}

impl PaprikaHttp {
    pub fn new(base_url: &str) -> Self {
        let builder = Client::builder()
            .timeout(Duration::from_secs(30))
            .pool_max_idle_per_host(10);

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build().expect("Failed to build HTTP client"),
        }
    }

    // ── Coins ────────────────────────────────────────────────────────────

    /// List all coins. The API returns thousands of entries; truncation for
    /// display is the consumer's concern.
    pub async fn get_coins(&self) -> Result<Vec<CoinResponse>, SdkError> {
        let url = format!("{}/coins", self.base_url);
        self.get(&url).await
    }

    /// Static descriptive metadata for one coin.
    pub async fn get_coin_info(&self, coin_id: &CoinId) -> Result<CoinInfoResponse, SdkError> {
        let url = format!("{}/coins/{}", self.base_url, coin_id.encoded());
        self.get(&url).await
    }

    // ── Tickers ──────────────────────────────────────────────────────────

    /// Live quote data for one coin, nested under currency codes.
    pub async fn get_coin_tickers(&self, coin_id: &CoinId) -> Result<TickerResponse, SdkError> {
        let url = format!("{}/tickers/{}", self.base_url, coin_id.encoded());
        self.get(&url).await
    }

    // ── OHLCV ────────────────────────────────────────────────────────────

    /// Historical daily candles between two Unix timestamps (seconds).
    pub async fn get_coin_history(
        &self,
        coin_id: &CoinId,
        start: Option<u64>,
        end: Option<u64>,
    ) -> Result<Vec<CandleResponse>, SdkError> {
        let mut url = format!(
            "{}/coins/{}/ohlcv/historical",
            self.base_url,
            coin_id.encoded()
        );
        let mut params = Vec::new();
        if let Some(s) = start {
            params.push(format!("start={}", s));
        }
        if let Some(e) = end {
            params.push(format!("end={}", e));
        }
        if !params.is_empty() {
            url = format!("{}?{}", url, params.join("&"));
        }
        self.get(&url).await
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, SdkError> {
        tracing::debug!(%url, "GET");
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(HttpError::from)?;
        let status = resp.status();

        if status.is_success() {
            // Read the body as text first so malformed JSON surfaces as a
            // parse error rather than a transport one.
            let body = resp.text().await.map_err(HttpError::from)?;
            return Ok(serde_json::from_str(&body)?);
        }

        let status_code = status.as_u16();
        let retry_after_ms = resp
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(retry_after_ms);
        let body_text = resp.text().await.unwrap_or_default();

        let err = match status_code {
            404 => HttpError::NotFound(body_text),
            429 => HttpError::RateLimited { retry_after_ms },
            400..=499 => HttpError::BadRequest(body_text),
            _ => HttpError::ServerError {
                status: status_code,
                body: body_text,
            },
        };
        Err(err.into())
    }
}

/// Parse a `Retry-After` header value (delay-seconds form) into milliseconds.
/// The value is server-controlled, so the conversion saturates instead of
/// overflowing.
fn retry_after_ms(value: &str) -> Option<u64> {
    value
        .trim()
        .parse::<u64>()
        .ok()
        .map(|secs| secs.saturating_mul(1000))
}

impl Clone for PaprikaHttp {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            client: self.client.clone(),
        }
    }
}
