//! CLI command handlers.
//!
//! Each subcommand maps to one API client method (or to a router navigation)
//! and prints the decoded result as pretty JSON. Login and register start the
//! session from the returned token; logout ends it.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use vibenotes_client::api::types::{Attachment, AuthResponse, AvatarUpload, Note, UserProfile};
use vibenotes_client::api::{self, ApiError};
use vibenotes_client::router::{Navigation, RouteError, RouteTable};
use vibenotes_client::session::{KeyringStore, MemoryStore, StoreError, TokenStore};
use vibenotes_client::{ApiClient, Config, Router, Session};

use crate::cli::{Args, Command};

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Route(#[from] RouteError),
    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to encode output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Everything a command needs: one session shared by client and router.
pub struct Context {
    pub session: Arc<Session>,
    pub api: ApiClient,
    pub router: Router,
}

impl Context {
    pub fn new(config: &Config, session: Arc<Session>) -> Result<Self, CliError> {
        Ok(Self {
            api: ApiClient::new(config, Arc::clone(&session))?,
            router: Router::new(RouteTable::default_routes(), Arc::clone(&session)),
            session,
        })
    }
}

pub async fn run(args: Args, config: &Config) -> Result<(), CliError> {
    let session = Arc::new(open_session(args.ephemeral));
    let ctx = Context::new(config, session)?;
    execute(&ctx, args.command).await
}

/// Restore the persisted session. A broken store degrades to an empty session.
fn open_session(ephemeral: bool) -> Session {
    let store = || -> Box<dyn TokenStore> {
        if ephemeral {
            Box::new(MemoryStore::new())
        } else {
            Box::new(KeyringStore::new())
        }
    };

    match Session::restore(store()) {
        Ok(session) => session,
        Err(e) => {
            log::warn!("Could not read stored token, starting signed out: {}", e);
            Session::new(store())
        }
    }
}

pub async fn execute(ctx: &Context, command: Command) -> Result<(), CliError> {
    match command {
        Command::Register { username, password } => {
            let resp = ctx.api.register(&username, &password).await?;
            start_session(ctx, api::read_json(resp).await?)
        }
        Command::Login { username, password } => {
            let resp = ctx.api.login(&username, &password).await?;
            start_session(ctx, api::read_json(resp).await?)
        }
        Command::Logout => {
            ctx.session.end()?;
            print_json(&json!({ "message": "Logged out" }))
        }
        Command::Test => {
            let text = api::read_text(ctx.api.test().await?).await?;
            println!("{}", text);
            Ok(())
        }
        Command::Profile => {
            let resp = ctx.api.get_current_user_profile().await?;
            print_json(&api::read_json::<UserProfile>(resp).await?)
        }
        Command::UpdateProfile {
            description,
            avatar_url,
        } => {
            let resp = ctx
                .api
                .update_profile(description.as_deref(), avatar_url.as_deref())
                .await?;
            print_json(&api::read_json::<UserProfile>(resp).await?)
        }
        Command::Users => {
            let resp = ctx.api.get_all_users().await?;
            print_json(&api::read_json::<Vec<UserProfile>>(resp).await?)
        }
        Command::User { id } => {
            let resp = ctx.api.get_user_by_id(id).await?;
            print_json(&api::read_json::<UserProfile>(resp).await?)
        }
        Command::UploadAvatar { file } => {
            let resp = ctx.api.upload_avatar(&file).await?;
            print_json(&api::read_json::<AvatarUpload>(resp).await?)
        }
        Command::Notes => {
            let resp = ctx.api.get_user_notes().await?;
            print_json(&api::read_json::<Vec<Note>>(resp).await?)
        }
        Command::Note { id } => {
            let resp = ctx.api.get_note_by_id(id).await?;
            print_json(&api::read_json::<Note>(resp).await?)
        }
        Command::CreateNote {
            title,
            content,
            public,
        } => {
            let resp = ctx.api.create_note(&title, &content, public).await?;
            print_json(&api::read_json::<Note>(resp).await?)
        }
        Command::UpdateNote {
            id,
            title,
            content,
            public,
        } => {
            let resp = ctx.api.update_note(id, &title, &content, public).await?;
            print_json(&api::read_json::<Note>(resp).await?)
        }
        Command::DeleteNote { id } => {
            api::read_empty(ctx.api.delete_note(id).await?).await?;
            print_json(&json!({ "deleted": id }))
        }
        Command::PublicNotes { username } => {
            let resp = ctx.api.get_public_notes_by_username(&username).await?;
            print_json(&api::read_json::<Vec<Note>>(resp).await?)
        }
        Command::Attach { note_id, file } => {
            let resp = ctx.api.upload_note_attachment(note_id, &file).await?;
            print_json(&api::read_json::<Attachment>(resp).await?)
        }
        Command::Download {
            note_id,
            attachment_id,
            output,
        } => {
            let resp = ctx
                .api
                .download_note_attachment(note_id, attachment_id)
                .await?;
            let suggested = resp
                .headers()
                .get(reqwest::header::CONTENT_DISPOSITION)
                .and_then(|v| v.to_str().ok())
                .and_then(disposition_filename);
            let bytes = api::read_bytes(resp).await?;

            let path = output_path(output, suggested, attachment_id);
            write_file(&path, &bytes).await?;
            print_json(&json!({
                "file": path.display().to_string(),
                "bytes": bytes.len(),
            }))
        }
        Command::Detach {
            note_id,
            attachment_id,
        } => {
            api::read_empty(ctx.api.delete_note_attachment(note_id, attachment_id).await?).await?;
            print_json(&json!({ "deleted": attachment_id, "note": note_id }))
        }
        Command::Navigate { path, from } => {
            let nav = ctx.router.navigate(from.as_deref(), &path)?;
            print_json(&navigation_json(&nav))
        }
    }
}

fn start_session(ctx: &Context, auth: AuthResponse) -> Result<(), CliError> {
    ctx.session.begin(&auth.token)?;
    log::info!("Signed in as {}", auth.username);
    // The token stays out of the output.
    print_json(&json!({
        "username": auth.username,
        "message": auth.message,
    }))
}

fn navigation_json(nav: &Navigation<'_>) -> serde_json::Value {
    let params: serde_json::Map<String, serde_json::Value> = nav
        .resolved
        .params
        .iter()
        .map(|(k, v)| (k.clone(), json!(v)))
        .collect();
    json!({
        "requested": nav.requested,
        "path": nav.resolved.path,
        "route": nav.resolved.route.name,
        "requiresAuth": nav.resolved.route.requires_auth,
        "redirected": nav.was_redirected(),
        "params": params,
    })
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn write_file(path: &Path, bytes: &[u8]) -> Result<(), CliError> {
    tokio::fs::write(path, bytes)
        .await
        .map_err(|source| CliError::Write {
            path: path.display().to_string(),
            source,
        })
}

/// Explicit output, else the server's filename, else `attachment-<id>`.
fn output_path(explicit: Option<PathBuf>, suggested: Option<String>, attachment_id: i64) -> PathBuf {
    explicit
        .or_else(|| suggested.map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(format!("attachment-{}", attachment_id)))
}

/// Extract a safe file name from a `Content-Disposition` header value.
///
/// Only the final path component is kept so a hostile header cannot point
/// outside the working directory.
fn disposition_filename(header: &str) -> Option<String> {
    let raw = disposition_params(header)
        .into_iter()
        .find(|(key, _)| key.eq_ignore_ascii_case("filename"))
        .map(|(_, value)| value)?;

    let name = Path::new(&raw).file_name()?.to_string_lossy().into_owned();
    if name.is_empty() || name == ".." {
        None
    } else {
        Some(name)
    }
}

/// Split the `key=value` parameters after the disposition type.
///
/// Quoted values may contain `;` and backslash-escaped characters.
fn disposition_params(header: &str) -> Vec<(String, String)> {
    let mut params = Vec::new();
    let mut chars = header.chars().peekable();

    // Skip the disposition type ("attachment", "inline").
    for c in chars.by_ref() {
        if c == ';' {
            break;
        }
    }

    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        if chars.peek().is_none() {
            break;
        }

        let mut key = String::new();
        while let Some(c) = chars.next_if(|c| *c != '=' && *c != ';') {
            key.push(c);
        }

        let mut value = String::new();
        if chars.next_if_eq(&'=').is_some() {
            while chars.next_if(|c| c.is_whitespace()).is_some() {}
            if chars.next_if_eq(&'"').is_some() {
                while let Some(c) = chars.next() {
                    match c {
                        '"' => break,
                        '\\' => value.extend(chars.next()),
                        _ => value.push(c),
                    }
                }
            }
            while let Some(c) = chars.next_if(|c| *c != ';') {
                value.push(c);
            }
        }
        chars.next_if_eq(&';');

        params.push((key.trim().to_string(), value.trim().to_string()));
    }

    params
}
