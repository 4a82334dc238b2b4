//! Coin domain — listing entries and per-coin static metadata.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod wire;

use crate::network::COIN_ICON_URL;
use crate::shared::CoinId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ─── Coin (listing entry) ────────────────────────────────────────────────────

/// One entry of the global coin list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub id: CoinId,
    pub name: String,
    pub symbol: String,
    pub rank: i32,
    pub is_new: bool,
    pub is_active: bool,
    /// Asset class as reported by the API (`"coin"` or `"token"`).
    pub kind: String,
}

impl Coin {
    /// Icon image URL for this coin, keyed by lowercased symbol.
    pub fn icon_url(&self) -> String {
        format!("{}/{}", COIN_ICON_URL, self.symbol.to_lowercase())
    }
}

// ─── CoinInfo (static metadata) ──────────────────────────────────────────────

/// Descriptive metadata for a single coin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinInfo {
    pub id: CoinId,
    pub name: String,
    pub symbol: String,
    pub rank: i32,
    pub is_new: bool,
    pub is_active: bool,
    pub kind: String,
    pub description: Option<String>,
    pub message: Option<String>,
    pub open_source: Option<bool>,
    pub started_at: Option<DateTime<Utc>>,
    pub development_status: Option<String>,
    pub hardware_wallet: Option<bool>,
    pub proof_type: Option<String>,
    pub org_structure: Option<String>,
    pub hash_algorithm: Option<String>,
    pub first_data_at: Option<DateTime<Utc>>,
    pub last_data_at: Option<DateTime<Utc>>,
}

// ─── Validation ──────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum ValidationError {
    MissingId,
    MissingName,
    MissingSymbol,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingId => write!(f, "Missing coin id"),
            ValidationError::MissingName => write!(f, "Missing name"),
            ValidationError::MissingSymbol => write!(f, "Missing symbol"),
        }
    }
}

impl std::error::Error for ValidationError {}
