// In crates/analytics/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("The portfolio has no records to summarize")]
    EmptyPortfolio,

    #[error("Unknown comparison metric '{0}' (expected sharpe, winrate, pnl or trades)")]
    UnknownMetric(String),

    #[error("CSV export failed: {0}")]
    Export(#[from] csv::Error),

    #[error("CSV export produced invalid UTF-8")]
    ExportEncoding,
}

pub type Result<T> = std::result::Result<T, Error>;
