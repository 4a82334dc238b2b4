//! Network URL constants for the Paprika SDK.

/// Default Coinpaprika REST API base URL.
pub const DEFAULT_API_URL: &str = "https://api.coinpaprika.com/v1";

/// Base URL for coin icon images, keyed by lowercased symbol.
pub const COIN_ICON_URL: &str = "https://coinicons-api.vercel.app/api/icon";
