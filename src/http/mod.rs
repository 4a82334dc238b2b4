//! HTTP client layer — `PaprikaHttp`, one method per Coinpaprika endpoint.

pub mod client;

pub use client::PaprikaHttp;
