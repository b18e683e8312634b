// In crates/analytics/src/types.rs

use crate::error::Error;
use core_types::Symbol;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A ticker together with the Sharpe ratio that ranked it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SharpeStanding {
    pub ticker: Symbol,
    pub sharpe: Option<f64>,
}

/// The overview cards of the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub best: SharpeStanding,
    pub worst: SharpeStanding,
    /// Mean over the records that have a finite Sharpe ratio; `0` when none do.
    pub average_sharpe: f64,
    /// How many records contributed to the average.
    pub rated: usize,
}

/// Coarse classification of a Sharpe ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SharpeBand {
    Strong,
    Positive,
    Negative,
}

impl SharpeBand {
    pub fn classify(sharpe: f64) -> Self {
        if sharpe > 1.0 {
            SharpeBand::Strong
        } else if sharpe > 0.0 {
            SharpeBand::Positive
        } else {
            SharpeBand::Negative
        }
    }
}

/// One row of the comparison table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRow {
    pub name: Symbol,
    pub sharpe: Option<f64>,
    pub total_trades: Option<u32>,
    pub win_rate: Option<f64>,
    #[serde(rename = "netPnL")]
    pub net_pnl: Option<f64>,
    pub band: Option<SharpeBand>,
}

/// The metric plotted by the comparison chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComparisonMetric {
    #[default]
    Sharpe,
    WinRate,
    #[serde(rename = "pnl")]
    NetPnl,
    #[serde(rename = "trades")]
    TotalTrades,
}

impl ComparisonMetric {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonMetric::Sharpe => "sharpe",
            ComparisonMetric::WinRate => "winrate",
            ComparisonMetric::NetPnl => "pnl",
            ComparisonMetric::TotalTrades => "trades",
        }
    }
}

impl FromStr for ComparisonMetric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sharpe" => Ok(ComparisonMetric::Sharpe),
            "winrate" => Ok(ComparisonMetric::WinRate),
            "pnl" => Ok(ComparisonMetric::NetPnl),
            "trades" => Ok(ComparisonMetric::TotalTrades),
            _ => Err(Error::UnknownMetric(s.to_string())),
        }
    }
}

impl fmt::Display for ComparisonMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricPoint {
    pub ticker: Symbol,
    pub value: f64,
}

/// Win and loss percentages of one ticker, from its trade-outcome table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WinLoss {
    pub ticker: Symbol,
    pub win_rate: f64,
    pub loss_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EquityTrend {
    Up,
    Down,
}

/// Simple and compound growth of a principal over a return series.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnProjection {
    pub amount: f64,
    /// Sum of the periodic returns, in percent.
    pub simple_rate: f64,
    /// Chained growth of the periodic returns, in percent.
    pub compound_rate: f64,
    pub simple_return: f64,
    pub compound_return: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sharpe_bands_use_strict_thresholds() {
        assert_eq!(SharpeBand::classify(1.01), SharpeBand::Strong);
        assert_eq!(SharpeBand::classify(1.0), SharpeBand::Positive);
        assert_eq!(SharpeBand::classify(0.0), SharpeBand::Negative);
        assert_eq!(SharpeBand::classify(-2.5), SharpeBand::Negative);
    }

    #[test]
    fn metric_names_round_trip() {
        for metric in [
            ComparisonMetric::Sharpe,
            ComparisonMetric::WinRate,
            ComparisonMetric::NetPnl,
            ComparisonMetric::TotalTrades,
        ] {
            assert_eq!(metric.as_str().parse::<ComparisonMetric>().unwrap(), metric);
        }
        assert_eq!(" WinRate ".parse::<ComparisonMetric>().unwrap(), ComparisonMetric::WinRate);
        assert!(matches!("drawdown".parse::<ComparisonMetric>(), Err(Error::UnknownMetric(_))));
    }
}
