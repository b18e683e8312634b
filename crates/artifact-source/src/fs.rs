// In crates/artifact-source/src/fs.rs

use crate::error::{Error, Result};
use crate::{ArtifactSource, artifact_path};
use async_trait::async_trait;
use core_types::{ArtifactKind, Symbol};
use std::io::ErrorKind;
use std::path::PathBuf;

/// Reads artifacts from a local results tree.
#[derive(Debug, Clone)]
pub struct FileSystemSource {
    root: PathBuf,
}

impl FileSystemSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_of(&self, ticker: &Symbol, kind: ArtifactKind) -> PathBuf {
        self.root.join(artifact_path(ticker, kind))
    }
}

#[async_trait]
impl ArtifactSource for FileSystemSource {
    fn name(&self) -> &'static str {
        "FileSystemSource"
    }

    async fn fetch(&self, ticker: &Symbol, kind: ArtifactKind) -> Result<String> {
        let path = self.path_of(ticker, kind);
        tracing::debug!(path = %path.display(), "Reading artifact.");

        tokio::fs::read_to_string(&path).await.map_err(|source| {
            let location = path.display().to_string();
            if source.kind() == ErrorKind::NotFound {
                Error::NotFound { location }
            } else {
                Error::Io { location, source }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_artifacts_from_the_results_tree() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("NVDA/NVDA_backtest_results");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("summary.txt"), "Sharpe Ratio: 1.5\n").unwrap();

        let source = FileSystemSource::new(root.path());
        let text = source
            .fetch(&Symbol::new("nvda"), ArtifactKind::Summary)
            .await
            .unwrap();
        assert_eq!(text, "Sharpe Ratio: 1.5\n");
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let root = tempfile::tempdir().unwrap();
        let source = FileSystemSource::new(root.path());

        let result = source.fetch(&Symbol::new("GS"), ArtifactKind::TradeEntries).await;
        match result {
            Err(Error::NotFound { location }) => assert!(location.ends_with("GS_backtest_results/trade_entries.csv")),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }
}
