//! User profile endpoints and avatar upload.

use std::path::Path;

use reqwest::Response;

use super::client::ApiClient;
use super::endpoints::Endpoint;
use super::error::ApiError;
use super::types::UpdateProfileRequest;

impl ApiClient {
    /// GET /users/profile for the session's user.
    pub async fn get_current_user_profile(&self) -> Result<Response, ApiError> {
        self.send(Endpoint::CurrentUserProfile).await
    }

    /// PUT /users/profile. `None` fields are left out of the body.
    pub async fn update_profile(
        &self,
        description: Option<&str>,
        avatar_url: Option<&str>,
    ) -> Result<Response, ApiError> {
        self.send(Endpoint::UpdateProfile(UpdateProfileRequest {
            description: description.map(str::to_string),
            avatar_url: avatar_url.map(str::to_string),
        }))
        .await
    }

    pub async fn get_all_users(&self) -> Result<Response, ApiError> {
        self.send(Endpoint::AllUsers).await
    }

    pub async fn get_user_by_id(&self, id: i64) -> Result<Response, ApiError> {
        self.send(Endpoint::UserById(id)).await
    }

    /// POST /upload/avatar as multipart. The response carries the stored URL,
    /// which is then saved with `update_profile`.
    pub async fn upload_avatar(&self, file: &Path) -> Result<Response, ApiError> {
        self.send(Endpoint::UploadAvatar(file.to_path_buf())).await
    }
}
