//! API client module for the VibeNotes backend.
//!
//! Provides the HTTP client with bearer-token injection, one method per REST
//! endpoint, and request/response types matching the backend API. Client
//! methods return the raw `reqwest::Response`; the `read_*` helpers below are
//! an opt-in layer that turns non-2xx statuses into [`ApiError::Status`].

pub mod attachments;
pub mod auth;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod notes;
pub mod types;
pub mod users;

#[cfg(test)]
mod tests;

use reqwest::Response;
use serde::de::DeserializeOwned;

pub use client::ApiClient;
pub use endpoints::Endpoint;
pub use error::ApiError;

/// Decode a successful JSON response body.
pub async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    let resp = ensure_success(resp).await?;
    Ok(resp.json::<T>().await?)
}

/// Read a successful response body as text.
pub async fn read_text(resp: Response) -> Result<String, ApiError> {
    let resp = ensure_success(resp).await?;
    Ok(resp.text().await?)
}

/// Read a successful response body as raw bytes.
pub async fn read_bytes(resp: Response) -> Result<Vec<u8>, ApiError> {
    let resp = ensure_success(resp).await?;
    Ok(resp.bytes().await?.to_vec())
}

/// Check the status of a response whose body is not needed (e.g. 204).
pub async fn read_empty(resp: Response) -> Result<(), ApiError> {
    ensure_success(resp).await.map(|_| ())
}

async fn ensure_success(resp: Response) -> Result<Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let text = resp.text().await.unwrap_or_default();
    let body = serde_json::from_str::<types::ErrorBody>(&text).ok();
    let message = body
        .as_ref()
        .and_then(types::ErrorBody::summary)
        .unwrap_or(text);

    Err(ApiError::Status {
        status,
        message,
        body,
    })
}
