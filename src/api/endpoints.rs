//! Descriptors for every backend REST call.
//!
//! An [`Endpoint`] is a plain value: method, path relative to the API root,
//! and payload. Building one performs no I/O; `ApiClient::send` turns it into
//! exactly one HTTP request.

use std::path::{Path, PathBuf};

use reqwest::Method;
use serde::Serialize;

use super::types::{Credentials, NoteRequest, UpdateProfileRequest};

#[derive(Debug, Clone, PartialEq)]
pub enum Endpoint {
    Register(Credentials),
    Login(Credentials),
    AuthTest,
    CurrentUserProfile,
    UpdateProfile(UpdateProfileRequest),
    AllUsers,
    UserById(i64),
    UploadAvatar(PathBuf),
    CreateNote(NoteRequest),
    UserNotes,
    NoteById(i64),
    UpdateNote(i64, NoteRequest),
    DeleteNote(i64),
    PublicNotesByUsername(String),
    UploadNoteAttachment { note_id: i64, file: PathBuf },
    DownloadNoteAttachment { note_id: i64, attachment_id: i64 },
    DeleteNoteAttachment { note_id: i64, attachment_id: i64 },
}

/// What goes in the request body.
#[derive(Debug, PartialEq)]
pub enum Payload<'a> {
    Empty,
    Json(JsonBody<'a>),
    /// Multipart form with the file under the `file` field.
    File(&'a Path),
}

#[derive(Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum JsonBody<'a> {
    Credentials(&'a Credentials),
    Profile(&'a UpdateProfileRequest),
    Note(&'a NoteRequest),
}

/// How the caller is expected to read the response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    Json,
    Binary,
}

impl Endpoint {
    pub fn method(&self) -> Method {
        match self {
            Endpoint::Register(_)
            | Endpoint::Login(_)
            | Endpoint::UploadAvatar(_)
            | Endpoint::CreateNote(_)
            | Endpoint::UploadNoteAttachment { .. } => Method::POST,
            Endpoint::UpdateProfile(_) | Endpoint::UpdateNote(..) => Method::PUT,
            Endpoint::DeleteNote(_) | Endpoint::DeleteNoteAttachment { .. } => Method::DELETE,
            Endpoint::AuthTest
            | Endpoint::CurrentUserProfile
            | Endpoint::AllUsers
            | Endpoint::UserById(_)
            | Endpoint::UserNotes
            | Endpoint::NoteById(_)
            | Endpoint::PublicNotesByUsername(_)
            | Endpoint::DownloadNoteAttachment { .. } => Method::GET,
        }
    }

    /// Path relative to the API root. Free-form segments are percent-encoded.
    pub fn path(&self) -> String {
        match self {
            Endpoint::Register(_) => "/auth/register".to_string(),
            Endpoint::Login(_) => "/auth/login".to_string(),
            Endpoint::AuthTest => "/auth/test".to_string(),
            Endpoint::CurrentUserProfile | Endpoint::UpdateProfile(_) => {
                "/users/profile".to_string()
            }
            Endpoint::AllUsers => "/users".to_string(),
            Endpoint::UserById(id) => format!("/users/{}", id),
            Endpoint::UploadAvatar(_) => "/upload/avatar".to_string(),
            Endpoint::CreateNote(_) | Endpoint::UserNotes => "/notes".to_string(),
            Endpoint::NoteById(id) | Endpoint::UpdateNote(id, _) | Endpoint::DeleteNote(id) => {
                format!("/notes/{}", id)
            }
            Endpoint::PublicNotesByUsername(username) => {
                format!("/public/users/{}/notes", urlencoding::encode(username))
            }
            Endpoint::UploadNoteAttachment { note_id, .. } => {
                format!("/notes/{}/attachments", note_id)
            }
            Endpoint::DownloadNoteAttachment {
                note_id,
                attachment_id,
            }
            | Endpoint::DeleteNoteAttachment {
                note_id,
                attachment_id,
            } => format!("/notes/{}/attachments/{}", note_id, attachment_id),
        }
    }

    pub fn payload(&self) -> Payload<'_> {
        match self {
            Endpoint::Register(creds) | Endpoint::Login(creds) => {
                Payload::Json(JsonBody::Credentials(creds))
            }
            Endpoint::UpdateProfile(req) => Payload::Json(JsonBody::Profile(req)),
            Endpoint::CreateNote(req) | Endpoint::UpdateNote(_, req) => {
                Payload::Json(JsonBody::Note(req))
            }
            Endpoint::UploadAvatar(file) | Endpoint::UploadNoteAttachment { file, .. } => {
                Payload::File(file)
            }
            _ => Payload::Empty,
        }
    }

    pub fn response_kind(&self) -> ResponseKind {
        match self {
            Endpoint::DownloadNoteAttachment { .. } => ResponseKind::Binary,
            _ => ResponseKind::Json,
        }
    }
}
