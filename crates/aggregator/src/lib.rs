// In crates/aggregator/src/lib.rs

pub mod error;
pub mod task;
pub mod update;

use artifact_source::ArtifactSource;
use artifacts::{
    parse_equity_curve, parse_outcome_counts, parse_pnl_data, parse_streaks, parse_summary,
    parse_trade_entries, parse_trade_length,
};
use core_types::{ArtifactKind, EquityPoint, OutcomeCounts, PortfolioState, Symbol, TickerPerformance};
use futures::future;
use std::collections::HashSet;
use std::sync::Arc;

pub use error::{Error, Result};
pub use task::{SharedState, run_refresh_loop, run_update_applier};
pub use update::apply_update;

/// Assembles per-ticker performance records from an [`ArtifactSource`].
///
/// Every artifact of every ticker is fetched concurrently. A failed fetch only
/// removes that artifact's contribution from its own ticker's record.
#[derive(Clone)]
pub struct TickerAggregator {
    source: Arc<dyn ArtifactSource>,
}

impl TickerAggregator {
    pub fn new(source: Arc<dyn ArtifactSource>) -> Self {
        Self { source }
    }

    /// Fetches and merges every artifact of one ticker.
    ///
    /// Summary values take precedence. The trade-outcome, streak and PnL tables
    /// only fill the fields the summary left absent. Fails only when none of the
    /// required artifacts could be fetched.
    pub async fn load_ticker_performance(&self, ticker: &Symbol) -> Result<TickerPerformance> {
        let (summary, trades, outcomes, streaks, pnl, length) = futures::join!(
            self.source.fetch(ticker, ArtifactKind::Summary),
            self.source.fetch(ticker, ArtifactKind::TradeEntries),
            self.source.fetch(ticker, ArtifactKind::TradeOutcomes),
            self.source.fetch(ticker, ArtifactKind::StreaksData),
            self.source.fetch(ticker, ArtifactKind::PnlData),
            self.source.fetch(ticker, ArtifactKind::TradeLengthData),
        );

        let mut record = TickerPerformance::new(ticker.clone());
        let mut missing = Vec::new();

        if let Some(text) = settle(ticker, ArtifactKind::Summary, summary, &mut missing) {
            parse_summary(&text).apply_to(&mut record);
        }
        if let Some(text) = settle(ticker, ArtifactKind::TradeEntries, trades, &mut missing) {
            record.trades = parse_trade_entries(&text);
        }
        if let Some(text) = settle(ticker, ArtifactKind::TradeOutcomes, outcomes, &mut missing) {
            fill_from_outcomes(&mut record, parse_outcome_counts(&text));
        }
        if let Some(text) = settle(ticker, ArtifactKind::StreaksData, streaks, &mut missing) {
            record.streaks.fill_from(&parse_streaks(&text));
        }
        if let Some(text) = settle(ticker, ArtifactKind::PnlData, pnl, &mut missing) {
            let pnl = parse_pnl_data(&text);
            record.gross_pnl = record.gross_pnl.or(pnl.gross);
            record.net_pnl = record.net_pnl.or(pnl.net);
        }
        if let Some(text) = settle(ticker, ArtifactKind::TradeLengthData, length, &mut missing) {
            record.trade_length = Some(parse_trade_length(&text));
        }

        if missing.len() == ArtifactKind::REQUIRED.len() {
            return Err(Error::AllArtifactsFailed {
                ticker: ticker.clone(),
            });
        }

        record.missing = missing;
        tracing::debug!(
            ticker = %ticker,
            trades = record.trades.len(),
            missing = record.missing.len(),
            "Ticker performance assembled."
        );
        Ok(record)
    }

    /// Loads every ticker concurrently and collects the results in input order.
    ///
    /// Duplicate tickers are loaded once. Tickers for which nothing could be
    /// fetched are left out of the returned state.
    pub async fn load_all(&self, tickers: &[Symbol]) -> PortfolioState {
        let tickers = unique(tickers);
        tracing::info!(count = tickers.len(), "Loading portfolio performance.");

        let results = future::join_all(tickers.iter().map(|t| self.load_ticker_performance(t))).await;

        let mut state = PortfolioState::new();
        for (ticker, result) in tickers.iter().zip(results) {
            match result {
                Ok(record) => {
                    state.insert(record);
                }
                Err(e) => tracing::error!(ticker = %ticker, error = %e, "Skipping ticker."),
            }
        }

        tracing::info!(loaded = state.len(), requested = tickers.len(), "Portfolio loaded.");
        state
    }

    /// Fetches and parses the equity curve of one ticker on demand.
    pub async fn load_equity_curve(&self, ticker: &Symbol) -> Result<Vec<EquityPoint>> {
        let text = self.source.fetch(ticker, ArtifactKind::EquityCurve).await?;
        Ok(parse_equity_curve(&text))
    }
}

/// Unwraps a fetch result, logging the failure and recording it when the artifact is required.
fn settle(
    ticker: &Symbol,
    kind: ArtifactKind,
    result: artifact_source::Result<String>,
    missing: &mut Vec<ArtifactKind>,
) -> Option<String> {
    match result {
        Ok(text) => Some(text),
        Err(e) if ArtifactKind::REQUIRED.contains(&kind) => {
            tracing::warn!(ticker = %ticker, artifact = kind.as_str(), error = %e, "Artifact unavailable.");
            missing.push(kind);
            None
        }
        Err(e) => {
            tracing::debug!(ticker = %ticker, artifact = kind.as_str(), error = %e, "Optional artifact unavailable.");
            None
        }
    }
}

fn fill_from_outcomes(record: &mut TickerPerformance, counts: OutcomeCounts) {
    record.won_trades = record.won_trades.or(Some(counts.won));
    record.lost_trades = record.lost_trades.or(Some(counts.lost));
    record.total_trades = record.total_trades.or(Some(counts.total()));
    record.win_rate = record.win_rate.or(Some(counts.win_rate()));
    record.outcomes = Some(counts);
}

pub(crate) fn unique(tickers: &[Symbol]) -> Vec<Symbol> {
    let mut seen = HashSet::new();
    tickers
        .iter()
        .filter(|t| seen.insert((*t).clone()))
        .cloned()
        .collect()
}
