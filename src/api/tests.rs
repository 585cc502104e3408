//! Client tests against a local capture server.
//!
//! The server records every request it receives (method, path, headers, body)
//! and answers with a canned response, so each test can assert exactly what
//! went over the wire.

#[cfg(test)]
mod client_tests {
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    use axum::body::Bytes;
    use axum::extract::State;
    use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
    use axum::response::IntoResponse;
    use serde_json::json;

    use crate::api::types::{AuthResponse, Note};
    use crate::api::{read_bytes, read_empty, read_json, read_text, ApiClient, ApiError};
    use crate::config::Config;
    use crate::session::{MemoryStore, Session};

    // ── Capture server ───────────────────────────────────────────────────

    #[derive(Debug, Clone)]
    struct Captured {
        method: String,
        path: String,
        headers: HeaderMap,
        body: Vec<u8>,
    }

    impl Captured {
        fn header(&self, name: &str) -> Option<&str> {
            self.headers.get(name).and_then(|v| v.to_str().ok())
        }

        fn json(&self) -> serde_json::Value {
            serde_json::from_slice(&self.body).unwrap()
        }

        fn body_contains(&self, needle: &str) -> bool {
            String::from_utf8_lossy(&self.body).contains(needle)
        }
    }

    #[derive(Clone)]
    struct Reply {
        status: StatusCode,
        content_type: &'static str,
        body: &'static [u8],
    }

    impl Reply {
        fn json(status: StatusCode, body: &'static str) -> Self {
            Self {
                status,
                content_type: "application/json",
                body: body.as_bytes(),
            }
        }

        fn binary(body: &'static [u8]) -> Self {
            Self {
                status: StatusCode::OK,
                content_type: "application/octet-stream",
                body,
            }
        }
    }

    #[derive(Clone)]
    struct CaptureState {
        requests: Arc<Mutex<Vec<Captured>>>,
        reply: Reply,
    }

    async fn record(
        State(state): State<CaptureState>,
        method: Method,
        uri: Uri,
        headers: HeaderMap,
        body: Bytes,
    ) -> impl IntoResponse {
        state.requests.lock().unwrap().push(Captured {
            method: method.to_string(),
            path: uri.path().to_string(),
            headers,
            body: body.to_vec(),
        });
        let reply = state.reply;
        (
            reply.status,
            [(header::CONTENT_TYPE, reply.content_type)],
            reply.body,
        )
    }

    struct Harness {
        client: ApiClient,
        session: Arc<Session>,
        requests: Arc<Mutex<Vec<Captured>>>,
    }

    impl Harness {
        fn captured(&self) -> Vec<Captured> {
            self.requests.lock().unwrap().clone()
        }

        fn only(&self) -> Captured {
            let captured = self.captured();
            assert_eq!(captured.len(), 1, "expected exactly one request");
            captured.into_iter().next().unwrap()
        }
    }

    async fn start(reply: Reply) -> Harness {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let app = axum::Router::new().fallback(record).with_state(CaptureState {
            requests: Arc::clone(&requests),
            reply,
        });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let session = Arc::new(Session::new(Box::new(MemoryStore::new())));
        let config = Config::with_base_url(&format!("http://{}", addr));
        let client = ApiClient::new(&config, Arc::clone(&session)).unwrap();

        Harness {
            client,
            session,
            requests,
        }
    }

    fn temp_file(dir: &tempfile::TempDir, name: &str, contents: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    /// Call every client method once, in table order.
    async fn call_every_endpoint(client: &ApiClient, file: &std::path::Path) {
        client.register("alice", "pw").await.unwrap();
        client.login("alice", "pw").await.unwrap();
        client.test().await.unwrap();
        client.get_current_user_profile().await.unwrap();
        client.update_profile(Some("bio"), None).await.unwrap();
        client.get_all_users().await.unwrap();
        client.get_user_by_id(2).await.unwrap();
        client.upload_avatar(file).await.unwrap();
        client.create_note("t", "c", false).await.unwrap();
        client.get_user_notes().await.unwrap();
        client.get_note_by_id(42).await.unwrap();
        client.update_note(42, "t", "c", true).await.unwrap();
        client.delete_note(42).await.unwrap();
        client.get_public_notes_by_username("alice").await.unwrap();
        client.upload_note_attachment(42, file).await.unwrap();
        client.download_note_attachment(42, 7).await.unwrap();
        client.delete_note_attachment(42, 7).await.unwrap();
    }

    const EXPECTED_REQUESTS: [(&str, &str); 17] = [
        ("POST", "/api/auth/register"),
        ("POST", "/api/auth/login"),
        ("GET", "/api/auth/test"),
        ("GET", "/api/users/profile"),
        ("PUT", "/api/users/profile"),
        ("GET", "/api/users"),
        ("GET", "/api/users/2"),
        ("POST", "/api/upload/avatar"),
        ("POST", "/api/notes"),
        ("GET", "/api/notes"),
        ("GET", "/api/notes/42"),
        ("PUT", "/api/notes/42"),
        ("DELETE", "/api/notes/42"),
        ("GET", "/api/public/users/alice/notes"),
        ("POST", "/api/notes/42/attachments"),
        ("GET", "/api/notes/42/attachments/7"),
        ("DELETE", "/api/notes/42/attachments/7"),
    ];

    // ── Request shape ────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_login_posts_credentials_and_returns_response_unmodified() {
        let h = start(Reply::json(
            StatusCode::OK,
            r#"{"token":"jwt-abc","username":"alice","message":"Login successful"}"#,
        ))
        .await;

        let resp = h.client.login("alice", "pw").await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let auth: AuthResponse = resp.json().await.unwrap();
        assert_eq!(auth.token, "jwt-abc");
        assert_eq!(auth.message.as_deref(), Some("Login successful"));

        let req = h.only();
        assert_eq!(req.method, "POST");
        assert_eq!(req.path, "/api/auth/login");
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert_eq!(req.json(), json!({"username": "alice", "password": "pw"}));
    }

    #[tokio::test]
    async fn test_get_note_by_id_issues_single_get() {
        let h = start(Reply::json(StatusCode::OK, "{}")).await;

        h.client.get_note_by_id(42).await.unwrap();

        let req = h.only();
        assert_eq!(req.method, "GET");
        assert_eq!(req.path, "/api/notes/42");
        assert!(req.body.is_empty());
    }

    #[tokio::test]
    async fn test_every_method_issues_exactly_one_request() {
        let h = start(Reply::json(StatusCode::OK, "{}")).await;
        let dir = tempfile::tempdir().unwrap();
        let file = temp_file(&dir, "avatar.png", b"PNGDATA");

        call_every_endpoint(&h.client, &file).await;

        let captured = h.captured();
        let seen: Vec<(&str, &str)> = captured
            .iter()
            .map(|c| (c.method.as_str(), c.path.as_str()))
            .collect();
        assert_eq!(seen, EXPECTED_REQUESTS.to_vec());
    }

    #[tokio::test]
    async fn test_note_bodies() {
        let h = start(Reply::json(StatusCode::OK, "{}")).await;

        h.client.create_note("Groceries", "milk", true).await.unwrap();
        h.client.update_note(3, "Groceries", "eggs", false).await.unwrap();
        h.client.update_profile(Some("hi"), Some("/uploads/avatars/x.png")).await.unwrap();

        let captured = h.captured();
        assert_eq!(
            captured[0].json(),
            json!({"title": "Groceries", "content": "milk", "isPublic": true})
        );
        assert_eq!(
            captured[1].json(),
            json!({"title": "Groceries", "content": "eggs", "isPublic": false})
        );
        assert_eq!(
            captured[2].json(),
            json!({"description": "hi", "avatarUrl": "/uploads/avatars/x.png"})
        );
    }

    #[tokio::test]
    async fn test_public_notes_username_is_encoded() {
        let h = start(Reply::json(StatusCode::OK, "[]")).await;

        h.client.get_public_notes_by_username("jane doe").await.unwrap();

        assert_eq!(h.only().path, "/api/public/users/jane%20doe/notes");
    }

    // ── Bearer token hook ────────────────────────────────────────────────

    #[tokio::test]
    async fn test_bearer_header_on_every_request_with_token() {
        let h = start(Reply::json(StatusCode::OK, "{}")).await;
        h.session.begin("tok-123").unwrap();
        let dir = tempfile::tempdir().unwrap();
        let file = temp_file(&dir, "a.txt", b"hello");

        call_every_endpoint(&h.client, &file).await;

        let captured = h.captured();
        assert_eq!(captured.len(), EXPECTED_REQUESTS.len());
        for req in captured {
            assert_eq!(req.header("authorization"), Some("Bearer tok-123"), "{}", req.path);
        }
    }

    #[tokio::test]
    async fn test_no_authorization_header_without_token() {
        let h = start(Reply::json(StatusCode::OK, "{}")).await;
        let dir = tempfile::tempdir().unwrap();
        let file = temp_file(&dir, "a.txt", b"hello");

        call_every_endpoint(&h.client, &file).await;

        for req in h.captured() {
            assert!(req.header("authorization").is_none(), "{}", req.path);
        }
    }

    #[tokio::test]
    async fn test_header_follows_session_lifecycle() {
        let h = start(Reply::json(StatusCode::OK, "[]")).await;

        h.session.begin("first").unwrap();
        h.client.get_user_notes().await.unwrap();
        h.session.end().unwrap();
        h.client.get_user_notes().await.unwrap();
        h.session.begin("second").unwrap();
        h.client.get_user_notes().await.unwrap();

        let auth: Vec<Option<String>> = h
            .captured()
            .iter()
            .map(|c| c.header("authorization").map(str::to_string))
            .collect();
        assert_eq!(
            auth,
            vec![
                Some("Bearer first".to_string()),
                None,
                Some("Bearer second".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_token_sends_no_authorization_header() {
        let h = start(Reply::json(StatusCode::OK, "[]")).await;

        h.session.begin("").unwrap();
        h.client.get_user_notes().await.unwrap();

        assert!(h.only().header("authorization").is_none());
    }

    // ── Uploads and downloads ────────────────────────────────────────────

    #[tokio::test]
    async fn test_upload_avatar_is_multipart() {
        let h = start(Reply::json(
            StatusCode::OK,
            r#"{"url":"/uploads/avatars/abc.png","message":"File uploaded successfully"}"#,
        ))
        .await;
        let dir = tempfile::tempdir().unwrap();
        let file = temp_file(&dir, "avatar.png", b"PNGDATA");

        h.client.upload_avatar(&file).await.unwrap();

        let req = h.only();
        assert_eq!(req.path, "/api/upload/avatar");
        let content_type = req.header("content-type").unwrap();
        assert!(content_type.starts_with("multipart/form-data; boundary="), "{}", content_type);
        assert!(req.body_contains(r#"name="file""#));
        assert!(req.body_contains(r#"filename="avatar.png""#));
        assert!(req.body_contains("Content-Type: image/png"));
        assert!(req.body_contains("PNGDATA"));
    }

    #[tokio::test]
    async fn test_upload_missing_file_sends_nothing() {
        let h = start(Reply::json(StatusCode::OK, "{}")).await;

        let err = h
            .client
            .upload_note_attachment(1, std::path::Path::new("/no/such/file.pdf"))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Io { .. }));
        assert!(h.captured().is_empty());
    }

    #[tokio::test]
    async fn test_download_attachment_returns_raw_bytes() {
        let h = start(Reply::binary(&[0x25, 0x50, 0x44, 0x46, 0x00, 0xFF])).await;

        let resp = h.client.download_note_attachment(3, 9).await.unwrap();
        let bytes = read_bytes(resp).await.unwrap();

        assert_eq!(bytes, vec![0x25, 0x50, 0x44, 0x46, 0x00, 0xFF]);
        let req = h.only();
        assert_eq!(req.path, "/api/notes/3/attachments/9");
        assert_eq!(req.header("accept"), Some("*/*"));
    }

    // ── Error propagation ────────────────────────────────────────────────

    #[tokio::test]
    async fn test_error_status_is_returned_unmodified() {
        let h = start(Reply::json(
            StatusCode::UNAUTHORIZED,
            r#"{"error":"Invalid username or password","message":"Authentication failed"}"#,
        ))
        .await;

        let resp = h.client.login("alice", "wrong").await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_read_json_maps_error_status() {
        let h = start(Reply::json(
            StatusCode::UNAUTHORIZED,
            r#"{"error":"Invalid username or password","message":"Authentication failed"}"#,
        ))
        .await;

        let resp = h.client.login("alice", "wrong").await.unwrap();
        let err = read_json::<AuthResponse>(resp).await.unwrap_err();

        match err {
            ApiError::Status {
                status,
                message,
                body,
            } => {
                assert_eq!(status, StatusCode::UNAUTHORIZED);
                assert_eq!(message, "Invalid username or password: Authentication failed");
                assert!(body.is_some());
            }
            other => panic!("expected Status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_read_text_keeps_non_json_error_body() {
        let h = start(Reply {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            content_type: "text/plain",
            body: b"boom",
        })
        .await;

        let resp = h.client.test().await.unwrap();
        let err = read_text(resp).await.unwrap_err();

        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(err.to_string(), "Request failed (500 Internal Server Error): boom");
    }

    #[tokio::test]
    async fn test_read_json_decodes_list() {
        let h = start(Reply::json(
            StatusCode::OK,
            r#"[{"id":1,"title":"a","content":"b","username":"alice","isPublic":true}]"#,
        ))
        .await;

        let resp = h.client.get_user_notes().await.unwrap();
        let notes: Vec<Note> = read_json(resp).await.unwrap();

        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].is_public, Some(true));
    }

    #[tokio::test]
    async fn test_read_empty_accepts_no_content() {
        let h = start(Reply::json(StatusCode::NO_CONTENT, "")).await;

        let resp = h.client.delete_note(5).await.unwrap();
        read_empty(resp).await.unwrap();
    }

    #[tokio::test]
    async fn test_transport_failure_is_http_error() {
        // Reserve a port, then close it so nothing is listening.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let session = Arc::new(Session::new(Box::new(MemoryStore::new())));
        let client =
            ApiClient::new(&Config::with_base_url(&format!("http://{}", addr)), session).unwrap();

        let err = client.get_all_users().await.unwrap_err();
        assert!(matches!(err, ApiError::Http(_)));
    }
}
