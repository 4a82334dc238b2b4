//! Wire types for ticker responses (REST).

use crate::shared::CoinId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Raw quote fields for one currency code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuoteResponse {
    pub price: Decimal,
    #[serde(default)]
    pub volume_24h: Decimal,
    #[serde(default)]
    pub volume_24h_change_24h: Decimal,
    #[serde(default)]
    pub market_cap: Decimal,
    #[serde(default)]
    pub market_cap_change_24h: Decimal,
    #[serde(default)]
    pub percent_change_15m: Decimal,
    #[serde(default)]
    pub percent_change_30m: Decimal,
    #[serde(default)]
    pub percent_change_1h: Decimal,
    #[serde(default)]
    pub percent_change_6h: Decimal,
    #[serde(default)]
    pub percent_change_12h: Decimal,
    #[serde(default)]
    pub percent_change_24h: Decimal,
    #[serde(default)]
    pub percent_change_7d: Decimal,
    #[serde(default)]
    pub percent_change_30d: Decimal,
    #[serde(default)]
    pub percent_change_1y: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ath_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ath_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent_from_price_ath: Option<Decimal>,
}

/// Raw ticker from `GET /tickers/{id}`, quotes nested under currency codes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TickerResponse {
    pub id: CoinId,
    pub name: String,
    pub symbol: String,
    #[serde(default)]
    pub rank: i32,
    #[serde(default)]
    pub circulating_supply: i64,
    #[serde(default)]
    pub total_supply: i64,
    #[serde(default)]
    pub max_supply: i64,
    #[serde(default)]
    pub beta_value: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_data_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
    pub quotes: HashMap<String, QuoteResponse>,
}
