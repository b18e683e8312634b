use aggregator::{Error, TickerAggregator};
use artifact_source::{ArtifactSource, FileSystemSource};
use async_trait::async_trait;
use core_types::{ArtifactKind, Symbol};
use std::path::Path;
use std::sync::Arc;

const NVDA_SUMMARY: &str = "Backtest Results Summary
======================

Sharpe Ratio: 1.85
Total Trades: 10
Won Trades: 8 (80.00%)
Lost Trades: 2 (20.00%)
Net PnL: 1432.25
Current Win Streak: 3
Longest Win Streak: 5
";

const NVDA_TRADES: &str = ",datetime,price,signal,closed
0,2024-01-02 09:30:00,481.68,BUY,False
1,2024-01-03 15:55:00,475.69,SELL,True
2,2024-01-04 10:00:00,n/a,HOLD,False
";

const NVDA_OUTCOMES: &str = "Outcome,Count\nWon,3\nLost,1\n";
const NVDA_STREAKS: &str = "Streak Type,Value\nWon (Current),1\nWon (Longest),9\nLost (Current),0\nLost (Longest),2\n";
const NVDA_PNL: &str = "Type,Value\nGross PnL,1520.5\nNet PnL,1.0\n";

fn write_artifact(root: &Path, ticker: &str, kind: ArtifactKind, content: &str) {
    let dir = root.join(format!("{ticker}/{ticker}_backtest_results"));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join(kind.file_name()), content).unwrap();
}

fn fixture_tree() -> tempfile::TempDir {
    let root = tempfile::tempdir().unwrap();
    let path = root.path();
    write_artifact(path, "NVDA", ArtifactKind::Summary, NVDA_SUMMARY);
    write_artifact(path, "NVDA", ArtifactKind::TradeEntries, NVDA_TRADES);
    write_artifact(path, "NVDA", ArtifactKind::TradeOutcomes, NVDA_OUTCOMES);
    write_artifact(path, "NVDA", ArtifactKind::StreaksData, NVDA_STREAKS);
    write_artifact(path, "NVDA", ArtifactKind::PnlData, NVDA_PNL);
    write_artifact(path, "NVDA", ArtifactKind::EquityCurve, "Timestamp,Value\n0,100.0\n1,104.5\n");
    write_artifact(path, "GS", ArtifactKind::Summary, "Sharpe Ratio: 0.42\n");
    write_artifact(path, "MSFT", ArtifactKind::TradeOutcomes, "Outcome,Count\nWon,6\nLost,4\n");
    root
}

fn aggregator_for(root: &Path) -> TickerAggregator {
    TickerAggregator::new(Arc::new(FileSystemSource::new(root)))
}

fn symbols(tickers: &[&str]) -> Vec<Symbol> {
    tickers.iter().map(Symbol::new).collect()
}

#[tokio::test]
async fn merges_all_artifacts_with_summary_precedence() {
    let root = fixture_tree();
    let record = aggregator_for(root.path())
        .load_ticker_performance(&Symbol::new("nvda"))
        .await
        .unwrap();

    assert_eq!(record.sharpe, Some(1.85));
    // Summary values win over the outcome table.
    assert_eq!(record.won_trades, Some(8));
    assert_eq!(record.win_rate, Some(80.0));
    assert_eq!(record.total_trades, Some(10));
    assert_eq!(record.net_pnl, Some(1432.25));
    // Filled from the secondary tables where the summary was silent.
    assert_eq!(record.gross_pnl, Some(1520.5));
    assert_eq!(record.streaks.current_win, Some(3));
    assert_eq!(record.streaks.longest_loss, Some(2));
    assert_eq!(record.trades.len(), 3);
    assert!(record.trades[2].price.is_nan());
    assert!(record.missing.is_empty());
    assert!(record.trade_length.is_none());
}

#[tokio::test]
async fn missing_artifacts_are_recorded_not_fatal() {
    let root = fixture_tree();
    let aggregator = aggregator_for(root.path());

    let gs = aggregator.load_ticker_performance(&Symbol::new("GS")).await.unwrap();
    assert_eq!(gs.sharpe, Some(0.42));
    assert!(gs.trades.is_empty());
    assert_eq!(
        gs.missing,
        vec![ArtifactKind::TradeEntries, ArtifactKind::TradeOutcomes, ArtifactKind::StreaksData]
    );

    let msft = aggregator.load_ticker_performance(&Symbol::new("MSFT")).await.unwrap();
    assert_eq!(msft.sharpe, None);
    assert_eq!(msft.total_trades, Some(10));
    assert_eq!(msft.win_rate, Some(60.0));
}

#[tokio::test]
async fn ticker_without_any_artifact_fails() {
    let root = fixture_tree();
    let result = aggregator_for(root.path())
        .load_ticker_performance(&Symbol::new("GME"))
        .await;

    assert!(matches!(result, Err(Error::AllArtifactsFailed { ticker }) if ticker.as_str() == "GME"));
}

#[tokio::test]
async fn load_all_keeps_input_order_and_omits_failures() {
    let root = fixture_tree();
    let state = aggregator_for(root.path())
        .load_all(&symbols(&["msft", "GME", "NVDA", "gs", "MSFT"]))
        .await;

    let order: Vec<_> = state.tickers().map(|t| t.as_str()).collect();
    assert_eq!(order, vec!["MSFT", "NVDA", "GS"]);
}

/// Fails every fetch for one ticker and delegates the rest.
struct FailingFor {
    ticker: Symbol,
    inner: FileSystemSource,
}

#[async_trait]
impl ArtifactSource for FailingFor {
    fn name(&self) -> &'static str {
        "FailingFor"
    }

    async fn fetch(&self, ticker: &Symbol, kind: ArtifactKind) -> artifact_source::Result<String> {
        if *ticker == self.ticker {
            return Err(artifact_source::Error::Status {
                status: 503,
                location: format!("{ticker}/{}", kind.file_name()),
            });
        }
        self.inner.fetch(ticker, kind).await
    }
}

#[tokio::test]
async fn one_failing_ticker_does_not_affect_the_others() {
    let root = fixture_tree();
    let tickers = symbols(&["NVDA", "GS"]);

    let healthy = aggregator_for(root.path()).load_all(&tickers).await;
    let degraded = TickerAggregator::new(Arc::new(FailingFor {
        ticker: Symbol::new("GS"),
        inner: FileSystemSource::new(root.path()),
    }))
    .load_all(&tickers)
    .await;

    assert_eq!(healthy.len(), 2);
    assert_eq!(degraded.len(), 1);

    let nvda = Symbol::new("NVDA");
    let (before, after) = (healthy.get(&nvda).unwrap(), degraded.get(&nvda).unwrap());
    assert_eq!(after.sharpe, before.sharpe);
    assert_eq!(after.streaks, before.streaks);
    assert_eq!(after.gross_pnl, before.gross_pnl);
    assert_eq!(after.trades.len(), before.trades.len());
    assert!(after.missing.is_empty());
}

#[tokio::test]
async fn equity_curve_is_loaded_on_demand() {
    let root = fixture_tree();
    let aggregator = aggregator_for(root.path());

    let curve = aggregator.load_equity_curve(&Symbol::new("NVDA")).await.unwrap();
    assert_eq!(curve.len(), 2);
    assert_eq!(curve[1].y, 104.5);

    let missing = aggregator.load_equity_curve(&Symbol::new("GS")).await;
    assert!(matches!(missing, Err(Error::Fetch(artifact_source::Error::NotFound { .. }))));
}
