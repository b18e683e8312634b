// In crates/web-server/src/types.rs

use aggregator::{SharedState, TickerAggregator};
use analytics::{ComparisonMetric, ComparisonRow, EquityTrend, MetricPoint, ReturnProjection};
use app_config::MarketData;
use core_types::{EquityPoint, PerformancePoint, Symbol};
use events::{DashboardEvent, PerformanceUpdate};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{broadcast, mpsc};

/// The most recent dashboard events, replayed to newly connected WebSocket clients.
pub type EventCache = Arc<Mutex<VecDeque<DashboardEvent>>>;

/// The shared application state that is available to all API handlers.
#[derive(Clone)]
pub struct AppState {
    pub state: SharedState,
    pub aggregator: TickerAggregator,
    pub updates_tx: mpsc::Sender<PerformanceUpdate>,
    pub events_tx: broadcast::Sender<DashboardEvent>,
    pub events_cache: EventCache,
    pub market: Arc<MarketData>,
}

/// Query parameters of `GET /api/comparison` (e.g., `?metric=winrate`).
#[derive(Debug, Deserialize)]
pub struct ComparisonParams {
    pub metric: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ComparisonResponse {
    pub metric: ComparisonMetric,
    pub rows: Vec<ComparisonRow>,
    pub series: Vec<MetricPoint>,
}

#[derive(Debug, Serialize)]
pub struct EquityCurveResponse {
    pub ticker: Symbol,
    pub points: Vec<EquityPoint>,
    pub trend: Option<EquityTrend>,
}

/// Query parameters of `GET /api/backtests/{symbol}/returns` (e.g., `?amount=$10,000`).
#[derive(Debug, Deserialize)]
pub struct ReturnsParams {
    pub amount: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ReturnsResponse {
    pub symbol: Symbol,
    pub series: Vec<PerformancePoint>,
    pub projection: ReturnProjection,
}
