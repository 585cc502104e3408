use reqwest::StatusCode;
use thiserror::Error;

use super::types::ErrorBody;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure: connect, TLS, timeout or body decode.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The local file for an upload could not be read.
    #[error("Failed to read upload file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Non-2xx response, only produced by the `read_*` helpers.
    #[error("Request failed ({status}): {message}")]
    Status {
        status: StatusCode,
        message: String,
        body: Option<ErrorBody>,
    },
}

impl ApiError {
    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Http(e) => e.status(),
            ApiError::Io { .. } => None,
            ApiError::Status { status, .. } => Some(*status),
        }
    }
}
