// In crates/artifact-source/src/lib.rs

use app_config::{ArtifactBackend, ArtifactSettings};
use async_trait::async_trait;
use core_types::{ArtifactKind, Symbol};
use std::sync::Arc;
use std::time::Duration;

pub mod error;
pub mod fs;
pub mod http;
pub mod timeout;

// Re-export public types
pub use error::{Error, Result};
pub use fs::FileSystemSource;
pub use http::HttpSource;
pub use timeout::TimeoutSource;

/// The universal interface for wherever backtest result artifacts live.
///
/// An `ArtifactSource` returns the raw text of one artifact of one ticker, or
/// fails. It holds no per-request state, so any number of fetches may run
/// concurrently against the same source.
#[async_trait]
pub trait ArtifactSource: Send + Sync {
    /// The name of the source (e.g., "FileSystemSource", "HttpSource").
    fn name(&self) -> &'static str;

    /// Fetches the raw text of `kind` for `ticker`.
    async fn fetch(&self, ticker: &Symbol, kind: ArtifactKind) -> Result<String>;
}

/// The location of an artifact relative to the results root:
/// `{TICKER}/{TICKER}_backtest_results/{file}`.
pub fn artifact_path(ticker: &Symbol, kind: ArtifactKind) -> String {
    format!("{0}/{0}_backtest_results/{1}", ticker.as_str(), kind.file_name())
}

/// Builds the configured source, wrapped in the per-request timeout.
pub fn from_settings(settings: &ArtifactSettings) -> Result<Arc<dyn ArtifactSource>> {
    let timeout = Duration::from_millis(settings.timeout_ms);
    let source: Arc<dyn ArtifactSource> = match settings.backend {
        ArtifactBackend::Fs => Arc::new(TimeoutSource::new(
            FileSystemSource::new(&settings.root),
            timeout,
        )),
        ArtifactBackend::Http => {
            let base_url = settings.base_url.as_deref().ok_or_else(|| {
                Error::ClientBuildError("artifacts.base_url is not configured".into())
            })?;
            Arc::new(TimeoutSource::new(HttpSource::new(base_url)?, timeout))
        }
    };
    tracing::info!(source = source.name(), timeout_ms = settings.timeout_ms, "Artifact source ready.");
    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_paths_follow_results_layout() {
        let nvda = Symbol::new("nvda");
        assert_eq!(
            artifact_path(&nvda, ArtifactKind::Summary),
            "NVDA/NVDA_backtest_results/summary.txt"
        );
        assert_eq!(
            artifact_path(&nvda, ArtifactKind::EquityCurve),
            "NVDA/NVDA_backtest_results/equity_curve.csv"
        );
    }

    #[test]
    fn builds_sources_from_settings() {
        let mut settings = ArtifactSettings {
            backend: ArtifactBackend::Fs,
            root: "results".into(),
            base_url: None,
            timeout_ms: 100,
        };
        assert_eq!(from_settings(&settings).unwrap().name(), "TimeoutSource");

        settings.backend = ArtifactBackend::Http;
        assert!(matches!(from_settings(&settings), Err(Error::ClientBuildError(_))));

        settings.base_url = Some("http://localhost:9000/results".into());
        assert!(from_settings(&settings).is_ok());
    }
}
