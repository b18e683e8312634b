// In crates/artifact-source/src/timeout.rs

use crate::error::{Error, Result};
use crate::ArtifactSource;
use async_trait::async_trait;
use core_types::{ArtifactKind, Symbol};
use std::time::Duration;

/// Bounds every fetch of the wrapped source. A fetch that runs past the limit
/// is abandoned and reported as [`Error::Timeout`].
pub struct TimeoutSource<S> {
    inner: S,
    limit: Duration,
}

impl<S: ArtifactSource> TimeoutSource<S> {
    pub fn new(inner: S, limit: Duration) -> Self {
        Self { inner, limit }
    }
}

#[async_trait]
impl<S: ArtifactSource> ArtifactSource for TimeoutSource<S> {
    fn name(&self) -> &'static str {
        "TimeoutSource"
    }

    async fn fetch(&self, ticker: &Symbol, kind: ArtifactKind) -> Result<String> {
        match tokio::time::timeout(self.limit, self.inner.fetch(ticker, kind)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    ticker = %ticker,
                    artifact = kind.as_str(),
                    source = self.inner.name(),
                    "Artifact fetch timed out."
                );
                Err(Error::Timeout(self.limit))
            }
        }
    }
}
