// In crates/web-server/src/lib.rs

use aggregator::{SharedState, TickerAggregator};
use analytics::{
    ComparisonMetric, PortfolioSummary, ReturnProjection, WinLoss, build_comparison_rows,
    equity_trend, metric_series, parse_principal, summarize, win_loss_breakdown,
};
use app_config::{MarketData, ServerSettings};
use axum::{
    Router,
    extract::{
        Path, Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
};
use core_types::{PerformanceDelta, PortfolioState, StockQuote, Symbol, TickerPerformance};
use events::{DashboardEvent, PerformanceUpdate};
use futures::{sink::SinkExt, stream::StreamExt};
use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{AppState, EventCache};
use types::{
    ComparisonParams, ComparisonResponse, EquityCurveResponse, ReturnsParams, ReturnsResponse,
};

/// The maximum number of events to keep in the replay cache.
const EVENT_CACHE_SIZE: usize = 200;

impl AppState {
    pub fn new(
        state: SharedState,
        aggregator: TickerAggregator,
        updates_tx: mpsc::Sender<PerformanceUpdate>,
        events_tx: broadcast::Sender<DashboardEvent>,
        market: MarketData,
    ) -> Self {
        Self {
            state,
            aggregator,
            updates_tx,
            events_tx,
            events_cache: Arc::new(Mutex::new(VecDeque::with_capacity(EVENT_CACHE_SIZE))),
            market: Arc::new(market),
        }
    }
}

/// Creates the main application router with all routes and middleware.
pub fn create_router(app_state: AppState) -> Router {
    // The dashboard is served from a different origin during development.
    let cors = tower_http::cors::CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any);

    let api_router = Router::new()
        .route("/performance", get(get_portfolio_handler))
        .route(
            "/performance/{ticker}",
            get(get_ticker_handler).post(push_update_handler),
        )
        .route("/performance/{ticker}/equity-curve", get(get_equity_curve_handler))
        .route("/summary", get(get_summary_handler))
        .route("/comparison", get(get_comparison_handler))
        .route("/win-loss", get(get_win_loss_handler))
        .route("/quotes", get(get_quotes_handler))
        .route("/backtests/{symbol}/returns", get(get_returns_handler));

    Router::new()
        .route("/ws", get(ws_handler))
        .route("/health", get(health_check_handler))
        .nest("/api", api_router)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

async fn health_check_handler() -> &'static str {
    "OK"
}

/// Handler for `GET /api/performance`. Every record, in insertion order.
async fn get_portfolio_handler(State(app): State<AppState>) -> Json<PortfolioState> {
    Json(app.state.read().await.clone())
}

/// Handler for `GET /api/performance/{ticker}`
async fn get_ticker_handler(
    State(app): State<AppState>,
    Path(ticker): Path<String>,
) -> Result<Json<TickerPerformance>> {
    let state = app.state.read().await;
    state
        .lookup(&ticker)
        .cloned()
        .map(Json)
        .ok_or_else(|| Error::NotFound(format!("No performance record for {}", Symbol::new(&ticker))))
}

/// Handler for `POST /api/performance/{ticker}`. Queues a partial record for the update applier.
async fn push_update_handler(
    State(app): State<AppState>,
    Path(ticker): Path<String>,
    Json(delta): Json<PerformanceDelta>,
) -> Result<StatusCode> {
    let ticker = Symbol::new(&ticker);
    tracing::info!(ticker = %ticker, "Queueing live performance update.");

    app.updates_tx
        .send(PerformanceUpdate::new(ticker, delta))
        .await
        .map_err(|_| Error::UpdatesClosed)?;
    Ok(StatusCode::ACCEPTED)
}

/// Handler for `GET /api/performance/{ticker}/equity-curve`. Read from the artifacts on every request.
async fn get_equity_curve_handler(
    State(app): State<AppState>,
    Path(ticker): Path<String>,
) -> Result<Json<EquityCurveResponse>> {
    let ticker = Symbol::new(&ticker);
    let points = app.aggregator.load_equity_curve(&ticker).await?;
    let trend = equity_trend(&points);

    Ok(Json(EquityCurveResponse {
        ticker,
        points,
        trend,
    }))
}

/// Handler for `GET /api/summary`
async fn get_summary_handler(State(app): State<AppState>) -> Result<Json<PortfolioSummary>> {
    let state = app.state.read().await;
    Ok(Json(summarize(&state)?))
}

/// Handler for `GET /api/comparison`
async fn get_comparison_handler(
    State(app): State<AppState>,
    Query(params): Query<ComparisonParams>,
) -> Result<Json<ComparisonResponse>> {
    let metric = match params.metric.as_deref() {
        Some(raw) => raw.parse::<ComparisonMetric>()?,
        None => ComparisonMetric::default(),
    };

    let state = app.state.read().await;
    Ok(Json(ComparisonResponse {
        metric,
        rows: build_comparison_rows(&state),
        series: metric_series(&state, metric),
    }))
}

/// Handler for `GET /api/win-loss`
async fn get_win_loss_handler(State(app): State<AppState>) -> Json<Vec<WinLoss>> {
    Json(win_loss_breakdown(&*app.state.read().await))
}

/// Handler for `GET /api/quotes`
async fn get_quotes_handler(State(app): State<AppState>) -> Json<BTreeMap<String, StockQuote>> {
    Json(app.market.quotes.clone())
}

/// Handler for `GET /api/backtests/{symbol}/returns`
async fn get_returns_handler(
    State(app): State<AppState>,
    Path(symbol): Path<String>,
    Query(params): Query<ReturnsParams>,
) -> Result<Json<ReturnsResponse>> {
    let symbol = Symbol::new(&symbol);
    let series = app
        .market
        .series(&symbol)
        .ok_or_else(|| Error::NotFound(format!("No backtest series for {symbol}")))?;

    let amount = parse_principal(params.amount.as_deref().unwrap_or_default())
        .ok_or_else(|| Error::BadRequest("amount must not exceed 1,000,000".to_string()))?;

    Ok(Json(ReturnsResponse {
        projection: ReturnProjection::compute(series, amount),
        series: series.to_vec(),
        symbol,
    }))
}

/// The handler for `GET /ws`.
/// Upgrades the connection to a WebSocket that streams dashboard events.
async fn ws_handler(ws: WebSocketUpgrade, State(app): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, app))
}

async fn handle_socket(mut socket: WebSocket, app: AppState) {
    tracing::info!("New WebSocket client connected.");

    // Subscribe before taking the replay so no event falls in between.
    let mut rx = app.events_tx.subscribe();

    let replay: Vec<_> = match app.events_cache.lock() {
        Ok(cache) => cache.iter().cloned().collect(),
        Err(poisoned) => poisoned.into_inner().iter().cloned().collect(),
    };
    for event in replay {
        if send_event(&mut socket, &event).await.is_err() {
            tracing::info!("WebSocket client disconnected during replay.");
            return;
        }
    }

    loop {
        tokio::select! {
            received = rx.recv() => match received {
                Ok(event) => {
                    if send_event(&mut socket, &event).await.is_err() {
                        tracing::info!("WebSocket client disconnected.");
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "WebSocket client lagged behind the event stream.");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            incoming = socket.next() => match incoming {
                Some(Ok(Message::Close(_))) | None | Some(Err(_)) => break,
                Some(Ok(_)) => {}
            },
        }
    }
    tracing::info!("WebSocket client connection closed.");
}

async fn send_event(socket: &mut WebSocket, event: &DashboardEvent) -> std::result::Result<(), ()> {
    let json = serde_json::to_string(event).map_err(|e| {
        tracing::error!(error = %e, "Failed to serialize dashboard event.");
    })?;
    socket.send(Message::Text(json.into())).await.map_err(|_| ())
}

/// Keeps the replay cache filled with the latest dashboard events.
async fn record_events(mut rx: broadcast::Receiver<DashboardEvent>, cache: EventCache) {
    loop {
        match rx.recv().await {
            Ok(event) => {
                let mut cache = match cache.lock() {
                    Ok(guard) => guard,
                    Err(poisoned) => poisoned.into_inner(),
                };
                if cache.len() == EVENT_CACHE_SIZE {
                    cache.pop_front();
                }
                cache.push_back(event);
            }
            Err(broadcast::error::RecvError::Lagged(_)) => continue,
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

/// The main entry point for running the web server.
///
/// Serves the router on `settings.host:settings.port` until the process is terminated.
pub async fn run(settings: ServerSettings, app_state: AppState) -> Result<()> {
    tokio::spawn(record_events(
        app_state.events_tx.subscribe(),
        app_state.events_cache.clone(),
    ));

    let app = create_router(app_state);

    let address = format!("{}:{}", settings.host, settings.port);
    tracing::info!("Web server listening on {}", address);

    let listener = TcpListener::bind(&address).await.map_err(Error::ServerBindError)?;

    axum::serve(listener, app.into_make_service())
        .await
        .map_err(Error::ServeError)
}
