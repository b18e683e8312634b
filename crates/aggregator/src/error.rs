// In crates/aggregator/src/error.rs

use core_types::Symbol;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No artifact could be loaded for {ticker}")]
    AllArtifactsFailed { ticker: Symbol },

    #[error("Artifact fetch failed: {0}")]
    Fetch(#[from] artifact_source::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
