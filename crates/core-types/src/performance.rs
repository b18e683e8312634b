// In crates/core-types/src/performance.rs

use crate::types::{ArtifactKind, Signal, Symbol};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A single row of a ticker's trade-entry log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeEntry {
    /// The timestamp exactly as written by the backtest driver.
    pub datetime: String,
    /// NaN when the source cell was not numeric; the row is kept regardless.
    pub price: f64,
    pub signal: Signal,
    pub closed: String,
}

impl TradeEntry {
    /// Parses `datetime` into a naive timestamp, accepting the formats the driver emits.
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        let raw = self.datetime.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.naive_local());
        }
        if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%:z") {
            return Some(dt.naive_local());
        }
        for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S"] {
            if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
                return Some(dt);
            }
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
    }

    /// Interprets the bool-like `closed` column. `None` when the value is not recognisable.
    pub fn is_closed(&self) -> Option<bool> {
        match self.closed.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "closed" => Some(true),
            "false" | "0" | "no" | "open" => Some(false),
            _ => None,
        }
    }
}

/// One point of an equity curve artifact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    /// `None` when the timestamp cell was not an integer.
    pub x: Option<i64>,
    /// NaN when the value cell was not numeric.
    pub y: f64,
}

impl EquityPoint {
    pub fn is_valid(&self) -> bool {
        self.x.is_some() && self.y.is_finite()
    }
}

/// Won/lost trade counts from a trade-outcome table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OutcomeCounts {
    pub won: u32,
    pub lost: u32,
}

impl OutcomeCounts {
    /// Total trades, saturating at `u32::MAX`.
    pub fn total(&self) -> u32 {
        self.won.saturating_add(self.lost)
    }

    /// Percentage of won trades, `0` when there are no trades at all.
    pub fn win_rate(&self) -> f64 {
        let total = u64::from(self.won) + u64::from(self.lost);
        if total > 0 {
            f64::from(self.won) / total as f64 * 100.0
        } else {
            0.0
        }
    }

    pub fn loss_rate(&self) -> f64 {
        100.0 - self.win_rate()
    }
}

/// Consecutive winning/losing trade runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Streaks {
    pub current_win: Option<u32>,
    pub longest_win: Option<u32>,
    pub current_loss: Option<u32>,
    pub longest_loss: Option<u32>,
}

impl Streaks {
    /// Fills every field that is still absent from `other`.
    pub fn fill_from(&mut self, other: &Streaks) {
        self.current_win = self.current_win.or(other.current_win);
        self.longest_win = self.longest_win.or(other.longest_win);
        self.current_loss = self.current_loss.or(other.current_loss);
        self.longest_loss = self.longest_loss.or(other.longest_loss);
    }
}

/// Gross vs. net profit from the `pnl_data` artifact.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PnlBreakdown {
    pub gross: Option<f64>,
    pub net: Option<f64>,
}

/// Average and maximum trade length, in bars.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TradeLength {
    pub average: Option<f64>,
    pub max: Option<f64>,
}

/// The assembled performance record of one ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerPerformance {
    pub ticker: Symbol,
    pub sharpe: Option<f64>,
    pub total_trades: Option<u32>,
    pub won_trades: Option<u32>,
    pub lost_trades: Option<u32>,
    pub win_rate: Option<f64>,
    #[serde(rename = "netPnL")]
    pub net_pnl: Option<f64>,
    #[serde(rename = "grossPnL")]
    pub gross_pnl: Option<f64>,
    pub streaks: Streaks,
    pub trades: Vec<TradeEntry>,
    pub outcomes: Option<OutcomeCounts>,
    pub trade_length: Option<TradeLength>,
    /// Artifacts that could not be fetched while this record was assembled.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<ArtifactKind>,
}

impl TickerPerformance {
    pub fn new(ticker: Symbol) -> Self {
        Self {
            ticker,
            sharpe: None,
            total_trades: None,
            won_trades: None,
            lost_trades: None,
            win_rate: None,
            net_pnl: None,
            gross_pnl: None,
            streaks: Streaks::default(),
            trades: Vec::new(),
            outcomes: None,
            trade_length: None,
            missing: Vec::new(),
        }
    }

    /// Shallow merge: every field present in `delta` replaces the current value.
    pub fn merge(&mut self, delta: PerformanceDelta) {
        if let Some(v) = delta.sharpe {
            self.sharpe = Some(v);
        }
        if let Some(v) = delta.total_trades {
            self.total_trades = Some(v);
        }
        if let Some(v) = delta.won_trades {
            self.won_trades = Some(v);
        }
        if let Some(v) = delta.lost_trades {
            self.lost_trades = Some(v);
        }
        if let Some(v) = delta.win_rate {
            self.win_rate = Some(v);
        }
        if let Some(v) = delta.net_pnl {
            self.net_pnl = Some(v);
        }
        if let Some(v) = delta.gross_pnl {
            self.gross_pnl = Some(v);
        }
        if let Some(v) = delta.streaks {
            self.streaks = v;
        }
        if let Some(v) = delta.trades {
            self.trades = v;
        }
        if let Some(v) = delta.outcomes {
            self.outcomes = Some(v);
        }
        if let Some(v) = delta.trade_length {
            self.trade_length = Some(v);
        }
    }
}

/// A partial record pushed by the live update channel.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PerformanceDelta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sharpe: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_trades: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub won_trades: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lost_trades: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub win_rate: Option<f64>,
    #[serde(rename = "netPnL", skip_serializing_if = "Option::is_none")]
    pub net_pnl: Option<f64>,
    #[serde(rename = "grossPnL", skip_serializing_if = "Option::is_none")]
    pub gross_pnl: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub streaks: Option<Streaks>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trades: Option<Vec<TradeEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcomes: Option<OutcomeCounts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trade_length: Option<TradeLength>,
}

impl PerformanceDelta {
    pub fn is_empty(&self) -> bool {
        *self == PerformanceDelta::default()
    }
}
