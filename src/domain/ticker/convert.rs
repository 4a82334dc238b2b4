//! Conversions from wire types to the validated ticker domain type.

use super::wire::{QuoteResponse, TickerResponse};
use super::{Quote, Ticker, ValidationError, QUOTE_CURRENCY};

impl From<QuoteResponse> for Quote {
    fn from(q: QuoteResponse) -> Self {
        Quote {
            price: q.price,
            volume_24h: q.volume_24h,
            volume_24h_change_24h: q.volume_24h_change_24h,
            market_cap: q.market_cap,
            market_cap_change_24h: q.market_cap_change_24h,
            percent_change_15m: q.percent_change_15m,
            percent_change_30m: q.percent_change_30m,
            percent_change_1h: q.percent_change_1h,
            percent_change_6h: q.percent_change_6h,
            percent_change_12h: q.percent_change_12h,
            percent_change_24h: q.percent_change_24h,
            percent_change_7d: q.percent_change_7d,
            percent_change_30d: q.percent_change_30d,
            percent_change_1y: q.percent_change_1y,
            ath_price: q.ath_price,
            ath_date: q.ath_date,
            percent_from_price_ath: q.percent_from_price_ath,
        }
    }
}

impl TryFrom<TickerResponse> for Ticker {
    type Error = ValidationError;

    fn try_from(mut resp: TickerResponse) -> Result<Self, Self::Error> {
        if resp.id.as_str().is_empty() {
            return Err(ValidationError::MissingId);
        }
        let usd = resp
            .quotes
            .remove(QUOTE_CURRENCY)
            .ok_or(ValidationError::MissingUsdQuote)?;

        Ok(Ticker {
            id: resp.id,
            name: resp.name,
            symbol: resp.symbol,
            rank: resp.rank,
            circulating_supply: resp.circulating_supply,
            total_supply: resp.total_supply,
            max_supply: resp.max_supply,
            beta_value: resp.beta_value,
            first_data_at: resp.first_data_at,
            last_updated: resp.last_updated,
            usd: usd.into(),
        })
    }
}
