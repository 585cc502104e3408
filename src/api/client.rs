//! HTTP client with session-driven auth header injection.
//!
//! Every request goes through [`ApiClient::send`], which attaches
//! `Authorization: Bearer <token>` when the shared [`Session`] holds a token
//! and leaves the header off otherwise.

use std::path::Path;
use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};

use super::endpoints::{Endpoint, Payload, ResponseKind};
use super::error::ApiError;
use crate::config::Config;
use crate::session::Session;

/// Accept list sent with JSON endpoints (text is allowed for /auth/test).
const JSON_ACCEPT: &str = "application/json, text/plain, */*";

/// Accept header for binary downloads; the server picks the stored file's type.
const BINARY_ACCEPT: &str = "*/*";

/// HTTP client wrapper for VibeNotes API communication.
///
/// Holds the configured `reqwest::Client`, the API root URL and the shared
/// session. Cheap to share behind an `Arc`.
pub struct ApiClient {
    client: Client,
    api_url: String,
    session: Arc<Session>,
}

impl ApiClient {
    /// Create a client for `config`, reading the token from `session`.
    pub fn new(config: &Config, session: Arc<Session>) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url(),
            session,
        })
    }

    /// API root this client sends to (`<base>/api`).
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Issue exactly one request for `endpoint` and return the response as-is.
    ///
    /// Non-2xx statuses are not errors here; only transport and upload-file
    /// failures are.
    pub async fn send(&self, endpoint: Endpoint) -> Result<Response, ApiError> {
        let method = endpoint.method();
        let path = endpoint.path();
        let url = format!("{}{}", self.api_url, path);

        let accept = match endpoint.response_kind() {
            ResponseKind::Json => JSON_ACCEPT,
            ResponseKind::Binary => BINARY_ACCEPT,
        };
        let mut builder = self
            .client
            .request(method.clone(), &url)
            .header(ACCEPT, accept);

        builder = match endpoint.payload() {
            Payload::Empty => builder,
            Payload::Json(body) => builder.json(&body),
            Payload::File(file) => builder.multipart(file_form(file).await?),
        };

        builder = self.authorize(builder);

        log::debug!("{} {}", method, path);
        Ok(builder.send().await?)
    }

    /// Request hook: attach the bearer token if the session has one.
    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

/// Build a multipart form with the file contents under the `file` field.
async fn file_form(path: &Path) -> Result<Form, ApiError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| ApiError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());

    let part = Part::bytes(bytes)
        .file_name(file_name)
        .mime_str(guess_mime(path))?;

    Ok(Form::new().part("file", part))
}

/// Content type for an upload, from the file extension.
fn guess_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain",
        Some("md") => "text/markdown",
        Some("json") => "application/json",
        Some("zip") => "application/zip",
        _ => "application/octet-stream",
    }
}
