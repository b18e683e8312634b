// In crates/artifacts/src/metrics.rs

//! The smaller `<label>, <value>` artifacts: gross/net PnL and trade length.

use crate::numeric::leading_float;
use crate::table::label_values;
use core_types::{PnlBreakdown, TradeLength};

pub fn parse_pnl_data(csv_text: &str) -> PnlBreakdown {
    let mut pnl = PnlBreakdown::default();
    for (label, value) in label_values(csv_text) {
        let value = leading_float(&value).unwrap_or(0.0);
        match label.as_str() {
            "Gross PnL" => pnl.gross = Some(value),
            "Net PnL" => pnl.net = Some(value),
            _ => {}
        }
    }
    pnl
}

pub fn parse_trade_length(csv_text: &str) -> TradeLength {
    let mut length = TradeLength::default();
    for (label, value) in label_values(csv_text) {
        let value = leading_float(&value).unwrap_or(0.0);
        match label.as_str() {
            "Average Trade Length" => length.average = Some(value),
            "Max Trade Length" => length.max = Some(value),
            _ => {}
        }
    }
    length
}
