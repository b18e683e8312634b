// In crates/aggregator/src/update.rs

use core_types::{PerformanceDelta, PortfolioState, Symbol};

/// Merges a partial record into the entry for `ticker`.
///
/// Fields present in `delta` replace the current values wholesale; absent ones
/// are left alone. An unknown ticker is appended with only the delta's fields.
pub fn apply_update(state: &mut PortfolioState, ticker: Symbol, delta: PerformanceDelta) {
    let created = !state.contains(&ticker);
    state.entry(ticker.clone()).merge(delta);
    tracing::debug!(ticker = %ticker, created, "Applied performance update.");
}
