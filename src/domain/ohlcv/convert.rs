//! Conversions from wire types to validated candles.

use super::wire::CandleResponse;
use super::{Candle, ValidationError};

impl TryFrom<CandleResponse> for Candle {
    type Error = ValidationError;

    fn try_from(resp: CandleResponse) -> Result<Self, Self::Error> {
        if resp.high < resp.low {
            return Err(ValidationError::InvertedPriceRange);
        }
        if resp.time_close < resp.time_open {
            return Err(ValidationError::InvertedTimeRange);
        }

        Ok(Candle {
            time_open: resp.time_open,
            time_close: resp.time_close,
            open: resp.open,
            high: resp.high,
            low: resp.low,
            close: resp.close,
            volume: resp.volume,
            market_cap: resp.market_cap,
        })
    }
}
