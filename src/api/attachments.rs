//! Note attachment endpoints.
//!
//! Uploads are multipart with a single `file` field. Downloads come back as
//! raw bytes; read them with [`super::read_bytes`] or stream the response.

use std::path::Path;

use reqwest::Response;

use super::client::ApiClient;
use super::endpoints::Endpoint;
use super::error::ApiError;

impl ApiClient {
    /// POST /notes/{note_id}/attachments.
    pub async fn upload_note_attachment(
        &self,
        note_id: i64,
        file: &Path,
    ) -> Result<Response, ApiError> {
        self.send(Endpoint::UploadNoteAttachment {
            note_id,
            file: file.to_path_buf(),
        })
        .await
    }

    /// GET /notes/{note_id}/attachments/{attachment_id}, binary body.
    pub async fn download_note_attachment(
        &self,
        note_id: i64,
        attachment_id: i64,
    ) -> Result<Response, ApiError> {
        self.send(Endpoint::DownloadNoteAttachment {
            note_id,
            attachment_id,
        })
        .await
    }

    pub async fn delete_note_attachment(
        &self,
        note_id: i64,
        attachment_id: i64,
    ) -> Result<Response, ApiError> {
        self.send(Endpoint::DeleteNoteAttachment {
            note_id,
            attachment_id,
        })
        .await
    }
}
