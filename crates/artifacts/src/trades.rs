// In crates/artifacts/src/trades.rs

use crate::numeric::leading_float;
use crate::table::data_rows;
use core_types::{Signal, TradeEntry};

/// Parses the trade-entry log: `<index>, datetime, price, signal, closed`.
///
/// The leading index column is dropped. A row is never rejected; a price that
/// is not numeric becomes NaN (not zero) so a broken log stays visible, and
/// missing cells become empty strings.
pub fn parse_trade_entries(csv_text: &str) -> Vec<TradeEntry> {
    data_rows(csv_text)
        .iter()
        .map(|row| TradeEntry {
            datetime: row.get(1).unwrap_or_default().to_string(),
            price: row.get(2).and_then(leading_float).unwrap_or(f64::NAN),
            signal: Signal::from_label(row.get(3).unwrap_or_default()),
            closed: row.get(4).unwrap_or_default().to_string(),
        })
        .collect()
}
