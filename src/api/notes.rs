use reqwest::Response;

use super::client::ApiClient;
use super::endpoints::Endpoint;
use super::error::ApiError;
use super::types::NoteRequest;

impl ApiClient {
    /// POST /notes.
    pub async fn create_note(
        &self,
        title: &str,
        content: &str,
        is_public: bool,
    ) -> Result<Response, ApiError> {
        self.send(Endpoint::CreateNote(note_request(title, content, is_public)))
            .await
    }

    /// GET /notes: every note owned by the session's user.
    pub async fn get_user_notes(&self) -> Result<Response, ApiError> {
        self.send(Endpoint::UserNotes).await
    }

    pub async fn get_note_by_id(&self, id: i64) -> Result<Response, ApiError> {
        self.send(Endpoint::NoteById(id)).await
    }

    /// PUT /notes/{id}.
    pub async fn update_note(
        &self,
        id: i64,
        title: &str,
        content: &str,
        is_public: bool,
    ) -> Result<Response, ApiError> {
        self.send(Endpoint::UpdateNote(id, note_request(title, content, is_public)))
            .await
    }

    pub async fn delete_note(&self, id: i64) -> Result<Response, ApiError> {
        self.send(Endpoint::DeleteNote(id)).await
    }

    /// GET /public/users/{username}/notes. Works without a session.
    pub async fn get_public_notes_by_username(&self, username: &str) -> Result<Response, ApiError> {
        self.send(Endpoint::PublicNotesByUsername(username.to_string()))
            .await
    }
}

fn note_request(title: &str, content: &str, is_public: bool) -> NoteRequest {
    NoteRequest {
        title: title.to_string(),
        content: content.to_string(),
        is_public,
    }
}
