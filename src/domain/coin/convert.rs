//! Conversions from wire types to validated coin domain types.

use super::wire::{CoinInfoResponse, CoinResponse};
use super::{Coin, CoinInfo, ValidationError};

impl TryFrom<CoinResponse> for Coin {
    type Error = ValidationError;

    fn try_from(resp: CoinResponse) -> Result<Self, Self::Error> {
        if resp.id.as_str().is_empty() {
            return Err(ValidationError::MissingId);
        }
        if resp.name.is_empty() {
            return Err(ValidationError::MissingName);
        }
        if resp.symbol.is_empty() {
            return Err(ValidationError::MissingSymbol);
        }

        Ok(Coin {
            id: resp.id,
            name: resp.name,
            symbol: resp.symbol,
            rank: resp.rank,
            is_new: resp.is_new,
            is_active: resp.is_active,
            kind: resp.coin_type,
        })
    }
}

impl TryFrom<CoinInfoResponse> for CoinInfo {
    type Error = ValidationError;

    fn try_from(resp: CoinInfoResponse) -> Result<Self, Self::Error> {
        if resp.id.as_str().is_empty() {
            return Err(ValidationError::MissingId);
        }
        if resp.name.is_empty() {
            return Err(ValidationError::MissingName);
        }
        if resp.symbol.is_empty() {
            return Err(ValidationError::MissingSymbol);
        }

        Ok(CoinInfo {
            id: resp.id,
            name: resp.name,
            symbol: resp.symbol,
            rank: resp.rank,
            is_new: resp.is_new,
            is_active: resp.is_active,
            kind: resp.coin_type,
            description: resp.description,
            message: resp.message,
            open_source: resp.open_source,
            started_at: resp.started_at,
            development_status: resp.development_status,
            hardware_wallet: resp.hardware_wallet,
            proof_type: resp.proof_type,
            org_structure: resp.org_structure,
            hash_algorithm: resp.hash_algorithm,
            first_data_at: resp.first_data_at,
            last_data_at: resp.last_data_at,
        })
    }
}
