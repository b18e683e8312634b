// In crates/artifact-source/src/error.rs

use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to build the artifact source: {0}")]
    ClientBuildError(String),
    #[error("Artifact not found: {location}")]
    NotFound { location: String },
    #[error("Failed to read {location}: {source}")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    #[error("Unexpected HTTP status {status} for {location}")]
    Status { status: u16, location: String },
    #[error("Fetch timed out after {0:?}")]
    Timeout(Duration),
}

pub type Result<T> = std::result::Result<T, Error>;
