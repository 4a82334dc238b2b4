//! Wire types for historical OHLCV responses (REST).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Raw candle from `GET /coins/{id}/ohlcv/historical`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CandleResponse {
    pub time_open: DateTime<Utc>,
    pub time_close: DateTime<Utc>,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    #[serde(default)]
    pub volume: Decimal,
    #[serde(default)]
    pub market_cap: Decimal,
}
