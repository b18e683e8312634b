// In crates/analytics/src/lib.rs

//! Portfolio-level statistics over the assembled ticker records, and the
//! principal-based return projections of the backtest page.

pub mod error;
pub mod export;
pub mod format;
pub mod returns;
pub mod summary;
pub mod types;

pub use error::{Error, Result};
pub use export::sharpe_comparison_csv;
pub use returns::{parse_principal, project_compound, project_return, project_simple};
pub use summary::{build_comparison_rows, equity_trend, metric_series, summarize, win_loss_breakdown};
pub use types::{
    ComparisonMetric, ComparisonRow, EquityTrend, MetricPoint, PortfolioSummary, ReturnProjection,
    SharpeBand, SharpeStanding, WinLoss,
};
