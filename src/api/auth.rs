//! Auth endpoints: register, login and the connectivity probe.
//!
//! These only issue the requests. Starting the session from the returned
//! token is the caller's job (see `Session::begin`).

use reqwest::Response;

use super::client::ApiClient;
use super::endpoints::Endpoint;
use super::error::ApiError;
use super::types::Credentials;

impl ApiClient {
    /// POST /auth/register with `{username, password}`.
    pub async fn register(&self, username: &str, password: &str) -> Result<Response, ApiError> {
        self.send(Endpoint::Register(Credentials {
            username: username.to_string(),
            password: password.to_string(),
        }))
        .await
    }

    /// POST /auth/login with `{username, password}`.
    pub async fn login(&self, username: &str, password: &str) -> Result<Response, ApiError> {
        self.send(Endpoint::Login(Credentials {
            username: username.to_string(),
            password: password.to_string(),
        }))
        .await
    }

    /// GET /auth/test. The backend answers with a plain-text greeting.
    pub async fn test(&self) -> Result<Response, ApiError> {
        self.send(Endpoint::AuthTest).await
    }
}
