//! OHLCV domain — historical daily candles for charting.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod wire;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

// ─── Candle ──────────────────────────────────────────────────────────────────

/// One validated OHLCV candle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub time_open: DateTime<Utc>,
    pub time_close: DateTime<Utc>,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
    pub market_cap: Decimal,
}

impl Candle {
    pub fn is_bullish(&self) -> bool {
        self.close >= self.open
    }
}

/// Closing prices of a candle series, in order — the line a price chart
/// draws.
pub fn close_series(candles: &[Candle]) -> Vec<Decimal> {
    candles.iter().map(|c| c.close).collect()
}

/// Closing timestamps of a candle series, in order — the chart's time axis.
pub fn close_times(candles: &[Candle]) -> Vec<DateTime<Utc>> {
    candles.iter().map(|c| c.time_close).collect()
}

// ─── Validation ──────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum ValidationError {
    /// `high` below `low`.
    InvertedPriceRange,
    /// `time_close` before `time_open`.
    InvertedTimeRange,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvertedPriceRange => write!(f, "Candle high below low"),
            ValidationError::InvertedTimeRange => write!(f, "Candle closes before it opens"),
        }
    }
}

impl std::error::Error for ValidationError {}
