//! # Paprika SDK
//!
//! A Rust SDK for the Coinpaprika public market-data API: coin listings,
//! per-coin metadata, live USD quotes, and historical OHLCV candles —
//! read-only, no authentication.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core** — Shared newtypes, domain models, errors (always available)
//! 2. **Query Cache** — `QueryCache` with subscriptions, request
//!    deduplication, stale-while-revalidate, and interval polling
//! 3. **HTTP API** — `PaprikaHttp` with one method per endpoint
//! 4. **High-Level Client** — `PaprikaClient` with nested sub-clients that
//!    wire the HTTP layer into the query cache
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use paprika_sdk::prelude::*;
//!
//! let client = PaprikaClient::builder().build()?;
//!
//! // One-shot typed fetches:
//! let coins = client.coins().list().await?;
//! let btc = client.tickers().get(&CoinId::from("btc-bitcoin")).await?;
//!
//! // Cache-backed subscription, polled every 10 s while held:
//! let sub = client.coins().watch_info(&CoinId::from("btc-bitcoin"), |snap| {
//!     if let Some(data) = snap.data {
//!         println!("refreshed: {data}");
//!     }
//! });
//! // …
//! sub.unsubscribe();
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes and display formatting used across all domains.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions.
pub mod domain;

/// Unified SDK error types.
pub mod error;

/// Network URL constants.
pub mod network;

/// Process-wide theme flag with change notification.
pub mod theme;

// ── Layer 2: Query Cache ─────────────────────────────────────────────────────

/// Query cache: keys, entries, subscriptions, snapshots.
pub mod query;

// ── Layer 3: HTTP API ────────────────────────────────────────────────────────

/// HTTP client with one method per Coinpaprika endpoint.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 4: High-Level Client ───────────────────────────────────────────────

/// `PaprikaClient` — the primary entry point.
#[cfg(feature = "http")]
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::CoinId;

    // Domain types
    pub use crate::domain::coin::{Coin, CoinInfo};
    pub use crate::domain::ohlcv::Candle;
    pub use crate::domain::ticker::{Quote, Ticker};

    // Query cache
    pub use crate::query::{
        QueryCache, QueryKey, QueryOptions, QuerySnapshot, QuerySubscription,
    };

    // Errors
    pub use crate::error::SdkError;

    // Network
    pub use crate::network::DEFAULT_API_URL;

    // Theme
    pub use crate::theme::{ThemeFlag, ThemeMode};

    // HTTP client + sub-clients
    #[cfg(feature = "http")]
    pub use crate::client::{
        CoinsClient, OhlcvClient, PaprikaClient, PaprikaClientBuilder, TickersClient,
    };
    #[cfg(feature = "http")]
    pub use crate::http::PaprikaHttp;
}
