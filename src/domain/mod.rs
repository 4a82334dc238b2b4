//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains:
//! - `mod.rs` — Rich domain types (validated, display-ready)
//! - `wire.rs` — Raw serde structs matching API responses
//! - `convert.rs` — `TryFrom` conversions with validation
//! - `client.rs` — Sub-client with typed fetches and cache-backed watches

pub mod coin;
pub mod ohlcv;
pub mod ticker;
