//! Wire types for coin responses (REST).

use crate::shared::CoinId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Raw coin list entry from `GET /coins`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoinResponse {
    pub id: CoinId,
    pub name: String,
    pub symbol: String,
    #[serde(default)]
    pub rank: i32,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub is_active: bool,
    #[serde(rename = "type", default)]
    pub coin_type: String,
}

/// Raw coin metadata from `GET /coins/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoinInfoResponse {
    pub id: CoinId,
    pub name: String,
    pub symbol: String,
    #[serde(default)]
    pub rank: i32,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub is_active: bool,
    #[serde(rename = "type", default)]
    pub coin_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_source: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub development_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hardware_wallet: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proof_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org_structure: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash_algorithm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_data_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_data_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coin_response_deserialize() {
        let json = r#"{
            "id": "btc-bitcoin",
            "name": "Bitcoin",
            "symbol": "BTC",
            "rank": 1,
            "is_new": false,
            "is_active": true,
            "type": "coin"
        }"#;
        let coin: CoinResponse = serde_json::from_str(json).unwrap();
        assert_eq!(coin.id.as_str(), "btc-bitcoin");
        assert_eq!(coin.coin_type, "coin");
        assert!(coin.is_active);
    }

    #[test]
    fn test_coin_info_response_nullable_fields() {
        let json = r#"{
            "id": "btc-bitcoin",
            "name": "Bitcoin",
            "symbol": "BTC",
            "rank": 1,
            "is_new": false,
            "is_active": true,
            "type": "coin",
            "description": "The first cryptocurrency.",
            "open_source": true,
            "started_at": "2009-01-03T00:00:00Z",
            "hash_algorithm": "SHA256",
            "proof_type": "proof of work",
            "first_data_at": null,
            "last_data_at": null
        }"#;
        let info: CoinInfoResponse = serde_json::from_str(json).unwrap();
        assert_eq!(info.hash_algorithm.as_deref(), Some("SHA256"));
        assert!(info.first_data_at.is_none());
        assert_eq!(info.started_at.unwrap().timestamp(), 1_230_940_800);
    }
}
