// In app/src/main.rs

use aggregator::{TickerAggregator, run_refresh_loop, run_update_applier};
use analytics::format::{format_dollars, format_number, format_optional, format_percent};
use analytics::{
    ComparisonMetric, ReturnProjection, build_comparison_rows, equity_trend, metric_series,
    parse_principal, sharpe_comparison_csv, summarize,
};
use anyhow::{Context, Result};
use app_config::Settings;
use clap::{Parser, Subcommand};
use core_types::{PortfolioState, Symbol};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{RwLock, broadcast, mpsc};
use tracing_subscriber::prelude::*;

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = "Aggregates backtest result artifacts into a portfolio tearsheet.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Prints the best, worst and average Sharpe ratio of the configured tickers.
    Summary,

    /// Prints the comparison table of the configured tickers.
    Compare {
        /// The metric to chart: sharpe, winrate, pnl or trades.
        #[arg(short, long, default_value = "sharpe")]
        metric: String,

        /// Also write the `Stock,Sharpe Ratio` export to this file.
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Loads and prints the equity curve of one ticker.
    Equity {
        #[arg(short, long)]
        ticker: String,
    },

    /// Projects the return of a principal over a symbol's backtest series.
    Project {
        #[arg(short, long)]
        symbol: String,

        /// The principal, e.g. "$10,000". At most 1,000,000.
        #[arg(short, long, default_value = "0")]
        amount: String,
    },

    /// Serves the dashboard API and keeps the portfolio state up to date.
    Serve,
}

// --- Main Application Entry Point ---

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from a .env file, if it exists.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let settings = app_config::load_settings().context("Failed to load application settings")?;
    init_tracing(&settings.app.log_level);
    tracing::info!(environment = %settings.app.environment, "Starting Tearsheet");

    match cli.command {
        Commands::Summary => handle_summary(&settings).await?,
        Commands::Compare { metric, csv } => handle_compare(&settings, &metric, csv).await?,
        Commands::Equity { ticker } => handle_equity(&settings, &ticker).await?,
        Commands::Project { symbol, amount } => handle_project(&settings, &symbol, &amount)?,
        Commands::Serve => run_server(settings).await?,
    }

    Ok(())
}

fn init_tracing(log_level: &str) {
    let level = log_level.parse::<tracing::Level>().unwrap_or(tracing::Level::INFO);
    let fmt_layer = tracing_subscriber::fmt::layer().with_filter(
        tracing_subscriber::filter::Targets::new()
            .with_target("hyper", tracing::Level::WARN)
            .with_target("reqwest", tracing::Level::WARN)
            .with_default(level),
    );
    tracing_subscriber::registry().with(fmt_layer).init();
}

fn build_aggregator(settings: &Settings) -> Result<TickerAggregator> {
    let source = artifact_source::from_settings(&settings.artifacts)
        .context("Failed to create the artifact source")?;
    Ok(TickerAggregator::new(source))
}

async fn load_portfolio(settings: &Settings) -> Result<PortfolioState> {
    let aggregator = build_aggregator(settings)?;
    Ok(aggregator.load_all(&settings.portfolio.symbols()).await)
}

// --- "Summary" Subcommand Logic ---

async fn handle_summary(settings: &Settings) -> Result<()> {
    let state = load_portfolio(settings).await?;

    let summary = match summarize(&state) {
        Ok(summary) => summary,
        Err(analytics::Error::EmptyPortfolio) => {
            tracing::warn!("No ticker could be loaded; nothing to summarize.");
            println!("No performance data available.");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    println!("\n--- Portfolio Summary ---");
    println!(
        "Best Performer:  {} (Sharpe {})",
        summary.best.ticker,
        format_optional(summary.best.sharpe, 2)
    );
    println!(
        "Worst Performer: {} (Sharpe {})",
        summary.worst.ticker,
        format_optional(summary.worst.sharpe, 2)
    );
    println!(
        "Average Sharpe:  {} over {} of {} tickers",
        format_number(summary.average_sharpe, 2),
        summary.rated,
        state.len()
    );

    for record in state.iter().filter(|r| !r.missing.is_empty()) {
        let missing: Vec<_> = record.missing.iter().map(|k| k.as_str()).collect();
        println!("  ! {} is missing: {}", record.ticker, missing.join(", "));
    }
    Ok(())
}

// --- "Compare" Subcommand Logic ---

async fn handle_compare(settings: &Settings, metric: &str, csv: Option<PathBuf>) -> Result<()> {
    let metric: ComparisonMetric = metric.parse()?;
    let state = load_portfolio(settings).await?;

    println!("\n{:<8} {:>8} {:>8} {:>10} {:>12}", "Stock", "Sharpe", "Trades", "Win Rate", "Net PnL");
    for row in build_comparison_rows(&state) {
        println!(
            "{:<8} {:>8} {:>8} {:>10} {:>12}",
            row.name.as_str(),
            format_optional(row.sharpe, 2),
            row.total_trades.map_or_else(|| "N/A".to_string(), |t| t.to_string()),
            row.win_rate.map_or_else(|| "N/A".to_string(), format_percent),
            row.net_pnl.map_or_else(|| "N/A".to_string(), format_dollars),
        );
    }

    println!("\n{} by ticker:", metric);
    for point in metric_series(&state, metric) {
        println!("  {:<8} {}", point.ticker.as_str(), format_number(point.value, 2));
    }

    if let Some(path) = csv {
        let export = sharpe_comparison_csv(&state)?;
        std::fs::write(&path, export)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!(path = %path.display(), "Sharpe comparison exported.");
    }
    Ok(())
}

// --- "Equity" Subcommand Logic ---

async fn handle_equity(settings: &Settings, ticker: &str) -> Result<()> {
    let ticker = Symbol::new(ticker);
    let points = build_aggregator(settings)?
        .load_equity_curve(&ticker)
        .await
        .with_context(|| format!("Failed to load the equity curve of {ticker}"))?;

    let valid = points.iter().filter(|p| p.is_valid()).count();
    println!("\n--- {ticker} Equity Curve ---");
    println!("Points: {} ({} malformed)", points.len(), points.len() - valid);
    if let (Some(first), Some(last)) = (points.first(), points.last()) {
        println!("First: {}  Last: {}", format_number(first.y, 2), format_number(last.y, 2));
    }
    match equity_trend(&points) {
        Some(trend) => println!("Trend: {trend:?}"),
        None => println!("Trend: n/a"),
    }
    Ok(())
}

// --- "Project" Subcommand Logic ---

fn handle_project(settings: &Settings, symbol: &str, amount: &str) -> Result<()> {
    let market = app_config::load_market_data(&settings.market.path)
        .with_context(|| format!("Failed to load market data from {}", settings.market.path))?;
    let symbol = Symbol::new(symbol);
    let series = market
        .series(&symbol)
        .with_context(|| format!("No backtest series for {symbol}"))?;
    let amount = parse_principal(amount).context("The principal must not exceed 1,000,000")?;

    let projection = ReturnProjection::compute(series, amount);
    println!("\n--- {symbol} Return Projection ({} periods) ---", series.len());
    println!("Initial Amount:       {}", format_dollars(projection.amount));
    println!("Simple Interest Rate: {}", format_percent(projection.simple_rate));
    println!("Simple Return:        {}", format_dollars(projection.simple_return));
    println!("Compound Rate:        {}", format_percent(projection.compound_rate));
    println!("Compound Return:      {}", format_dollars(projection.compound_return));
    Ok(())
}

// --- "Serve" Subcommand Logic ---

/// Loads the portfolio once, starts the background tasks and serves the API.
/// Runs until the process is terminated.
async fn run_server(settings: Settings) -> Result<()> {
    let aggregator = build_aggregator(&settings)?;
    let tickers = settings.portfolio.symbols();

    let market = match app_config::load_market_data(&settings.market.path) {
        Ok(market) => market,
        Err(e) => {
            tracing::warn!(path = %settings.market.path, error = %e, "Market data unavailable; quotes and returns will be empty.");
            app_config::MarketData::default()
        }
    };

    let initial = aggregator.load_all(&tickers).await;
    if initial.is_empty() {
        tracing::warn!("No ticker could be loaded at startup.");
    }
    let state = Arc::new(RwLock::new(initial));

    let (updates_tx, updates_rx) = mpsc::channel(256);
    let (events_tx, _) = broadcast::channel(1024);

    tokio::spawn(run_update_applier(state.clone(), updates_rx, events_tx.clone()));

    if let Some(secs) = settings.portfolio.refresh_interval_secs.filter(|s| *s > 0) {
        tokio::spawn(run_refresh_loop(
            aggregator.clone(),
            tickers,
            state.clone(),
            events_tx.clone(),
            Duration::from_secs(secs),
        ));
    }

    let app_state = web_server::AppState::new(state, aggregator, updates_tx, events_tx, market);
    web_server::run(settings.server, app_state).await?;
    Ok(())
}
