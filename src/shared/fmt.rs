//! Display formatting for monetary values.
//!
//! Mirrors how consumers render quotes: USD prices with a fixed three
//! decimal places, large aggregates with thousands separators.

use rust_decimal::Decimal;

/// Format a USD price with a `$` prefix and exactly three decimal places.
pub fn usd(value: &Decimal) -> String {
    format!("${:.3}", value.round_dp(3))
}

/// Format a large integer amount (supply, volume) with comma separators.
pub fn grouped(value: i64) -> String {
    let raw = value.unsigned_abs().to_string();
    let grouped = raw
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|c| std::str::from_utf8(c).unwrap_or_default())
        .collect::<Vec<_>>()
        .join(",");
    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}
