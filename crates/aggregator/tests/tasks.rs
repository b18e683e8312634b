use aggregator::{SharedState, TickerAggregator, run_refresh_loop, run_update_applier};
use artifact_source::{ArtifactSource, Error as SourceError};
use async_trait::async_trait;
use core_types::{ArtifactKind, PerformanceDelta, PortfolioState, Symbol};
use events::{DashboardEvent, PerformanceUpdate};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{RwLock, broadcast, mpsc};

/// Serves summaries from memory.
struct MemorySource {
    summaries: HashMap<Symbol, String>,
}

#[async_trait]
impl ArtifactSource for MemorySource {
    fn name(&self) -> &'static str {
        "MemorySource"
    }

    async fn fetch(&self, ticker: &Symbol, kind: ArtifactKind) -> artifact_source::Result<String> {
        match (kind, self.summaries.get(ticker)) {
            (ArtifactKind::Summary, Some(text)) => Ok(text.clone()),
            _ => Err(SourceError::NotFound {
                location: format!("{ticker}/{}", kind.file_name()),
            }),
        }
    }
}

fn shared(state: PortfolioState) -> SharedState {
    Arc::new(RwLock::new(state))
}

#[tokio::test]
async fn applier_applies_in_order_and_rebroadcasts() {
    let state = shared(PortfolioState::new());
    let (updates_tx, updates_rx) = mpsc::channel(8);
    let (events_tx, mut events_rx) = broadcast::channel(8);

    let applier = tokio::spawn(run_update_applier(state.clone(), updates_rx, events_tx));

    for sharpe in [0.5, 1.5] {
        let delta = PerformanceDelta {
            sharpe: Some(sharpe),
            ..Default::default()
        };
        updates_tx
            .send(PerformanceUpdate::new(Symbol::new("tsla"), delta))
            .await
            .unwrap();
    }
    drop(updates_tx);
    applier.await.unwrap();

    let guard = state.read().await;
    assert_eq!(guard.len(), 1);
    assert_eq!(guard.lookup("TSLA").unwrap().sharpe, Some(1.5));

    let first = events_rx.recv().await.unwrap();
    assert!(matches!(first, DashboardEvent::PerformanceUpdated(u) if u.delta.sharpe == Some(0.5)));
}

#[tokio::test(start_paused = true)]
async fn refresh_loop_swaps_in_a_rebuilt_state() {
    let source = MemorySource {
        summaries: HashMap::from([(Symbol::new("GS"), "Sharpe Ratio: 0.7\n".to_string())]),
    };
    let aggregator = TickerAggregator::new(Arc::new(source));
    let state = shared(PortfolioState::new());
    let (events_tx, mut events_rx) = broadcast::channel(8);

    let refresher = tokio::spawn(run_refresh_loop(
        aggregator,
        vec![Symbol::new("GS"), Symbol::new("GME")],
        state.clone(),
        events_tx,
        Duration::from_secs(3),
    ));

    match events_rx.recv().await.unwrap() {
        DashboardEvent::PortfolioRefreshed(refreshed) => {
            assert_eq!(refreshed.tickers, vec![Symbol::new("GS")]);
            assert_eq!(refreshed.failed, vec![Symbol::new("GME")]);
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert_eq!(state.read().await.lookup("gs").unwrap().sharpe, Some(0.7));

    refresher.abort();
}
