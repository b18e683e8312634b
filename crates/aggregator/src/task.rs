// In crates/aggregator/src/task.rs

use crate::{TickerAggregator, apply_update, unique};
use chrono::Utc;
use core_types::{PortfolioState, Symbol};
use events::{DashboardEvent, PerformanceUpdate, PortfolioRefreshed};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{RwLock, broadcast, mpsc};
use tokio::time::MissedTickBehavior;

/// The portfolio state as shared between the server handlers and the background tasks.
pub type SharedState = Arc<RwLock<PortfolioState>>;

/// Drains the live update channel, applying each update to the shared state in
/// arrival order. Applied updates are re-broadcast to dashboard observers.
///
/// Returns once every sender has been dropped.
pub async fn run_update_applier(
    state: SharedState,
    mut updates_rx: mpsc::Receiver<PerformanceUpdate>,
    events_tx: broadcast::Sender<DashboardEvent>,
) {
    tracing::info!("Starting performance update applier.");

    while let Some(update) = updates_rx.recv().await {
        {
            let mut guard = state.write().await;
            apply_update(&mut guard, update.ticker.clone(), update.delta.clone());
        }
        // No subscribers is not an error.
        let _ = events_tx.send(DashboardEvent::PerformanceUpdated(update));
    }

    tracing::info!("Update channel closed. Applier stopped.");
}

/// Rebuilds the whole state from the artifacts every `every` and swaps it in.
///
/// The first rebuild happens one full interval after the call; the caller is
/// expected to have performed the initial load. Runs until the task is dropped.
pub async fn run_refresh_loop(
    aggregator: TickerAggregator,
    tickers: Vec<Symbol>,
    state: SharedState,
    events_tx: broadcast::Sender<DashboardEvent>,
    every: Duration,
) {
    let tickers = unique(&tickers);
    let mut interval = tokio::time::interval(every);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately.
    interval.tick().await;

    tracing::info!(every_secs = every.as_secs_f64(), "Starting portfolio refresh loop.");

    loop {
        interval.tick().await;

        let fresh = aggregator.load_all(&tickers).await;
        let refreshed = PortfolioRefreshed {
            at: Utc::now(),
            tickers: fresh.tickers().cloned().collect(),
            failed: tickers.iter().filter(|t| !fresh.contains(t)).cloned().collect(),
        };

        state.write().await.replace_all(fresh);
        let _ = events_tx.send(DashboardEvent::PortfolioRefreshed(refreshed));
    }
}
