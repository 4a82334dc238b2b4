//! Ticker domain — live USD quote for one coin.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod wire;

use crate::shared::{fmt as shared_fmt, CoinId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Currency code the domain layer extracts from the nested quote map.
pub const QUOTE_CURRENCY: &str = "USD";

// ─── Quote ───────────────────────────────────────────────────────────────────

/// Live USD quote fields for one coin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub price: Decimal,
    pub volume_24h: Decimal,
    pub volume_24h_change_24h: Decimal,
    pub market_cap: Decimal,
    pub market_cap_change_24h: Decimal,
    pub percent_change_15m: Decimal,
    pub percent_change_30m: Decimal,
    pub percent_change_1h: Decimal,
    pub percent_change_6h: Decimal,
    pub percent_change_12h: Decimal,
    pub percent_change_24h: Decimal,
    pub percent_change_7d: Decimal,
    pub percent_change_30d: Decimal,
    pub percent_change_1y: Decimal,
    pub ath_price: Option<Decimal>,
    pub ath_date: Option<DateTime<Utc>>,
    pub percent_from_price_ath: Option<Decimal>,
}

impl Quote {
    /// Price rendered as `$1234.567` (three decimal places).
    pub fn price_display(&self) -> String {
        shared_fmt::usd(&self.price)
    }
}

// ─── Ticker ──────────────────────────────────────────────────────────────────

/// Validated ticker for one coin with the USD quote pulled out of the
/// currency map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticker {
    pub id: CoinId,
    pub name: String,
    pub symbol: String,
    pub rank: i32,
    pub circulating_supply: i64,
    pub total_supply: i64,
    pub max_supply: i64,
    pub beta_value: Decimal,
    pub first_data_at: Option<DateTime<Utc>>,
    pub last_updated: Option<DateTime<Utc>>,
    pub usd: Quote,
}

impl Ticker {
    /// Total supply with thousands separators, for display.
    pub fn total_supply_display(&self) -> String {
        shared_fmt::grouped(self.total_supply)
    }

    /// Max supply with thousands separators, for display.
    pub fn max_supply_display(&self) -> String {
        shared_fmt::grouped(self.max_supply)
    }
}

// ─── Validation ──────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum ValidationError {
    MissingId,
    MissingUsdQuote,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingId => write!(f, "Missing coin id"),
            ValidationError::MissingUsdQuote => {
                write!(f, "Ticker has no {} quote", QUOTE_CURRENCY)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
