// In crates/core-types/src/lib.rs

pub mod market;
pub mod performance;
pub mod state;
pub mod types;

// Re-export the most important types for easy access from other crates.
pub use market::{PerformancePoint, StockQuote};
pub use performance::{
    EquityPoint, OutcomeCounts, PerformanceDelta, PnlBreakdown, Streaks, TickerPerformance,
    TradeEntry, TradeLength,
};
pub use state::PortfolioState;
pub use types::{ArtifactKind, Field, Signal, Symbol};
