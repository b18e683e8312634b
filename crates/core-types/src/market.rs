// In crates/core-types/src/market.rs

use crate::types::Signal;
use serde::{Deserialize, Serialize};

/// A row of the live-quote table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockQuote {
    pub name: String,
    pub price: f64,
    pub volume: u64,
    pub eps: f64,
    #[serde(rename = "analyst eps")]
    pub analyst_eps: f64,
    #[serde(rename = "whisper number")]
    pub whisper_number: f64,
    #[serde(rename = "surprise eps")]
    pub surprise_eps: f64,
    /// Encoded on the wire as 0 (hold), 1 (buy) or 2 (sell).
    #[serde(rename = "trading signal", with = "signal_code")]
    pub trading_signal: Signal,
}

/// One periodic return of a per-symbol backtest series, in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformancePoint {
    pub date: String,
    pub performance: f64,
}

mod signal_code {
    use crate::types::Signal;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(signal: &Signal, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(signal.code())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Signal, D::Error> {
        Ok(Signal::from_code(i64::deserialize(deserializer)?))
    }
}
