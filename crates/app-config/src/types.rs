// In crates/app-config/src/types.rs

use core_types::{PerformancePoint, StockQuote, Symbol};
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    /// The application's general settings.
    pub app: AppSettings,
    /// Where the per-ticker result artifacts are read from.
    pub artifacts: ArtifactSettings,
    /// The tickers the dashboard tracks.
    pub portfolio: PortfolioSettings,
    pub server: ServerSettings,
    #[serde(default)]
    pub market: MarketSettings,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppSettings {
    /// The environment the application is running in (e.g., "development", "production").
    pub environment: String,
    /// The log level for the application.
    pub log_level: String,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactBackend {
    #[default]
    Fs,
    Http,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ArtifactSettings {
    #[serde(default)]
    pub backend: ArtifactBackend,
    /// Root directory of the results tree when `backend = "fs"`.
    #[serde(default = "default_root")]
    pub root: String,
    /// Base URL of the results tree when `backend = "http"`.
    pub base_url: Option<String>,
    /// Per-request timeout; a fetch that exceeds it counts as a failed artifact.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

#[derive(Deserialize, Debug, Clone)]
pub struct PortfolioSettings {
    pub tickers: Vec<String>,
    /// When set, the server rebuilds every record on this interval.
    pub refresh_interval_secs: Option<u64>,
}

impl PortfolioSettings {
    /// The configured tickers, normalised and in configuration order.
    pub fn symbols(&self) -> Vec<Symbol> {
        self.tickers.iter().map(Symbol::new).collect()
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Deserialize, Debug, Clone)]
pub struct MarketSettings {
    /// Path of the TOML file holding the quote table and per-symbol return series.
    #[serde(default = "default_market_path")]
    pub path: String,
}

impl Default for MarketSettings {
    fn default() -> Self {
        Self {
            path: default_market_path(),
        }
    }
}

// --- Structs for market.toml ---

/// The live-quote table and the backtest return series, keyed by symbol.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct MarketData {
    #[serde(default)]
    pub quotes: BTreeMap<String, StockQuote>,
    #[serde(default)]
    pub backtests: BTreeMap<String, Vec<PerformancePoint>>,
}

impl MarketData {
    pub fn series(&self, symbol: &Symbol) -> Option<&[PerformancePoint]> {
        self.backtests
            .iter()
            .find(|(key, _)| Symbol::new(key) == *symbol)
            .map(|(_, series)| series.as_slice())
    }
}

/// Helper functions for serde defaults
fn default_root() -> String { "results".to_string() }
fn default_timeout_ms() -> u64 { 5_000 }
fn default_market_path() -> String { "config/market.toml".to_string() }
