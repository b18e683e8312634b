// --- Live dashboard messages (shared by the aggregator and the web server) ---

use chrono::{DateTime, Utc};
use core_types::{PerformanceDelta, Symbol};
use serde::{Deserialize, Serialize};

/// A partial performance record for one ticker, pushed through the live update channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceUpdate {
    pub ticker: Symbol,
    pub delta: PerformanceDelta,
}

impl PerformanceUpdate {
    pub fn new(ticker: Symbol, delta: PerformanceDelta) -> Self {
        Self { ticker, delta }
    }
}

/// Emitted after the whole portfolio state has been rebuilt from the artifacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioRefreshed {
    pub at: DateTime<Utc>,
    /// Tickers present in the rebuilt state, in insertion order.
    pub tickers: Vec<Symbol>,
    /// Configured tickers that could not be loaded at all.
    pub failed: Vec<Symbol>,
}

/// The top-level event enum streamed to dashboard observers.
/// `tag` and `content` are used by serde for clean JSON representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum DashboardEvent {
    PerformanceUpdated(PerformanceUpdate),
    PortfolioRefreshed(PortfolioRefreshed),
}
