// In crates/app-config/src/lib.rs

use config::{Config, Environment, File};
use std::path::Path;

pub mod error;
pub mod types;

// Re-export the most important types for easy access.
pub use error::{Error, Result};
pub use types::{ArtifactBackend, ArtifactSettings, MarketData, PortfolioSettings, ServerSettings, Settings};

/// Loads the application settings from the `config/` directory.
///
/// This function orchestrates the layered configuration loading:
/// 1. Reads from a default `base.toml` file.
/// 2. Merges settings from an environment-specific file (e.g., `development.toml`).
/// 3. Merges settings from environment variables.
pub fn load_settings() -> Result<Settings> {
    load_settings_from("config")
}

/// Same as [`load_settings`] but rooted at an arbitrary configuration directory.
pub fn load_settings_from(dir: impl AsRef<Path>) -> Result<Settings> {
    let dir = dir.as_ref();
    // Get the current environment. Default to "development" if not set.
    let environment = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "development".into());

    let settings = Config::builder()
        .add_source(File::from(dir.join("base")))
        .add_source(File::from(dir.join(&environment)).required(false))
        // Settings from environment variables (e.g., `APP_ARTIFACTS__ROOT=...`).
        // The prefix is `APP`, separator is `__`.
        .add_source(
            Environment::with_prefix("APP")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("portfolio.tickers")
                .try_parsing(true),
        )
        .build()?;

    let settings: Settings = settings.try_deserialize()?;
    validate(&settings)?;

    Ok(settings)
}

fn validate(settings: &Settings) -> Result<()> {
    if settings.artifacts.backend == ArtifactBackend::Http && settings.artifacts.base_url.is_none() {
        return Err(Error::Invalid(
            "artifacts.base_url is required when artifacts.backend = \"http\"".into(),
        ));
    }
    if settings.artifacts.timeout_ms == 0 {
        return Err(Error::Invalid("artifacts.timeout_ms must be positive".into()));
    }
    Ok(())
}

/// Loads the quote table and return series from a `market.toml` file.
pub fn load_market_data(path: impl AsRef<Path>) -> Result<MarketData> {
    let content = std::fs::read_to_string(path)?;

    let data: MarketData = toml::from_str(&content)?;
    Ok(data)
}
