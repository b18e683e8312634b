// In crates/artifact-source/src/http.rs

use crate::error::{Error, Result};
use crate::{ArtifactSource, artifact_path};
use async_trait::async_trait;
use core_types::{ArtifactKind, Symbol};
use reqwest::StatusCode;

/// Fetches artifacts from a results tree served over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSource {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpSource {
    pub fn new(base_url: &str) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::ClientBuildError(e.to_string()))?;
        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn url_of(&self, ticker: &Symbol, kind: ArtifactKind) -> String {
        format!("{}/{}", self.base_url, artifact_path(ticker, kind))
    }
}

#[async_trait]
impl ArtifactSource for HttpSource {
    fn name(&self) -> &'static str {
        "HttpSource"
    }

    async fn fetch(&self, ticker: &Symbol, kind: ArtifactKind) -> Result<String> {
        let url = self.url_of(ticker, kind);
        tracing::debug!(%url, "Fetching artifact.");

        let response = self.http_client.get(&url).send().await?;

        // Any non-success status makes the artifact unavailable.
        match response.status() {
            status if status.is_success() => Ok(response.text().await?),
            StatusCode::NOT_FOUND => Err(Error::NotFound { location: url }),
            status => Err(Error::Status {
                status: status.as_u16(),
                location: url,
            }),
        }
    }
}
