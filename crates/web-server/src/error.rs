// In crates/web-server/src/error.rs

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to bind server address: {0}")]
    ServerBindError(#[source] std::io::Error),

    #[error("Server stopped unexpectedly: {0}")]
    ServeError(#[source] std::io::Error),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("The live update channel is closed")]
    UpdatesClosed,

    #[error(transparent)]
    Analytics(#[from] analytics::Error),

    #[error(transparent)]
    Aggregator(#[from] aggregator::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    fn status(&self) -> StatusCode {
        match self {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::BadRequest(_) | Error::Analytics(analytics::Error::UnknownMetric(_)) => {
                StatusCode::BAD_REQUEST
            }
            Error::Analytics(analytics::Error::EmptyPortfolio) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::Aggregator(aggregator::Error::Fetch(artifact_source::Error::NotFound { .. })) => {
                StatusCode::NOT_FOUND
            }
            Error::Aggregator(_) => StatusCode::BAD_GATEWAY,
            Error::UpdatesClosed => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, %status, "Request failed.");
        } else {
            tracing::warn!(error = %self, %status, "Request rejected.");
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
