// In crates/artifacts/src/lib.rs

//! Parsers that turn the human-readable backtest artifacts into typed records.
//!
//! Every parser is a pure, total function over its input text: malformed
//! individual fields degrade to zero (or NaN where documented) instead of
//! failing the whole artifact.

pub mod equity;
pub mod metrics;
pub mod numeric;
pub mod outcomes;
pub mod streaks;
pub mod summary;
pub mod table;
pub mod trades;

pub use equity::parse_equity_curve;
pub use metrics::{parse_pnl_data, parse_trade_length};
pub use outcomes::parse_outcome_counts;
pub use streaks::parse_streaks;
pub use summary::{SummaryFields, parse_summary};
pub use trades::parse_trade_entries;
