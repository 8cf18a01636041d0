//! Test fixtures: an in-process fake of the FeedsApp REST backend.
//!
//! The fake speaks the backend's wire format (PascalCase models, `null` list
//! envelopes, `{"error": ...}` bodies) and records every request it sees so
//! tests can assert on headers and form fields.

#![allow(dead_code)]

use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    Json, Router,
    extract::{Multipart, Path, Request, State},
    http::{HeaderMap, StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use feedsapp_client::domain::BaseUrl;
use serde_json::{Value, json};
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;

pub const TOKEN: &str = "token-123";
pub const LOGIN: &str = "budi";
pub const PASSWORD: &str = "secret1";
pub const CREATED_AT: &str = "2024-05-01T08:30:00+07:00";

/// A request as seen by the fake backend.
#[derive(Debug, Clone, Default)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    /// Text fields of a multipart body.
    pub fields: Vec<(String, String)>,
    /// `(field name, file name)` of uploaded files.
    pub files: Vec<(String, String)>,
    /// Per-part `Content-Type` of uploaded files, in upload order.
    pub content_types: Vec<Option<String>>,
    pub json: Option<Value>,
}

/// Backend data. Lists set to `None` are served as `null`.
#[derive(Debug, Clone)]
pub struct BackendState {
    pub viewer: Value,
    pub users: Option<Vec<Value>>,
    pub following: Option<Vec<Value>>,
    pub followers: Option<Vec<Value>>,
    pub feeds: Option<Vec<Value>>,
    pub chatrooms: Option<Vec<Value>>,
    pub messages: Option<Vec<Value>>,
    pub requests: Vec<RecordedRequest>,
    next_id: u64,
}

pub fn user(id: u64, fullname: &str, username: &str) -> Value {
    json!({
        "ID": id,
        "Fullname": fullname,
        "Username": username,
        "Email": format!("{username}@feeds.id"),
        "PhotoProfile": "",
        "JenisKelamin": "Man",
        "TanggalLahir": "1999-04-01T00:00:00Z",
    })
}

pub fn feed(id: u64, body: &str, author: &Value) -> Value {
    json!({
        "ID": id,
        "Feed": body,
        "File": "",
        "UserID": author["ID"],
        "User": author,
        "CreatedAt": CREATED_AT,
        "UpdatedAt": CREATED_AT,
        "DeletedAt": null,
        "Comments": null,
        "Reactions": null,
    })
}

impl Default for BackendState {
    fn default() -> Self {
        let budi = user(1, "Budi Santoso", LOGIN);
        let sari = user(2, "Sari Dewi", "sari");
        Self {
            feeds: Some(vec![
                feed(10, "Halo semua", &budi),
                feed(11, "Selamat pagi", &sari),
            ]),
            users: Some(vec![budi.clone(), sari]),
            viewer: budi,
            following: None,
            followers: None,
            chatrooms: None,
            messages: None,
            requests: Vec::new(),
            next_id: 100,
        }
    }
}

impl BackendState {
    /// Serve `feeds` from `/feeds`; `None` is sent as `null`.
    pub fn with_feeds(mut self, feeds: Option<Vec<Value>>) -> Self {
        self.feeds = feeds;
        self
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Attach body details to the most recent recorded request.
    fn annotate(&mut self, update: impl FnOnce(&mut RecordedRequest)) {
        if let Some(last) = self.requests.last_mut() {
            update(last);
        }
    }
}

type SharedState = Arc<Mutex<BackendState>>;

/// Fake backend bound to an ephemeral local port.
pub struct TestServer {
    base_url: String,
    state: SharedState,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Self {
        Self::with_state(BackendState::default()).await
    }

    pub async fn with_state(state: BackendState) -> Self {
        let state = Arc::new(Mutex::new(state));
        let app = router(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test server");
        let addr = listener.local_addr().expect("Failed to read local address");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Test server stopped unexpectedly");
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
            handle,
        }
    }

    pub fn base_url(&self) -> BaseUrl {
        BaseUrl::new(&self.base_url).expect("Invalid test server URL")
    }

    pub fn state(&self) -> MutexGuard<'_, BackendState> {
        self.state.lock().expect("Test server state poisoned")
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state().requests.clone()
    }

    /// Most recent request matching `method` and `path`.
    pub fn last_request(&self, method: &str, path: &str) -> Option<RecordedRequest> {
        self.requests()
            .into_iter()
            .rev()
            .find(|request| request.method == method && request.path == path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn router(state: SharedState) -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
        .route(
            "/profile",
            get(profile).put(update_profile).delete(deactivate),
        )
        .route("/users", get(users))
        .route("/following", get(following))
        .route("/followers", get(followers))
        .route("/follow/{id}", post(follow).delete(unfollow))
        .route("/feeds", get(feeds).post(create_feed))
        .route("/feeds/{id}", put(update_feed).delete(delete_feed))
        .route("/feeds/{id}/like", post(like_feed))
        .route("/feeds/{id}/comments", post(add_comment))
        .route("/chatrooms", get(chatrooms).post(create_chatroom))
        .route(
            "/chatrooms/{id}/messages",
            get(messages).post(send_message),
        )
        .route("/messages/{id}", delete(delete_message))
        .layer(middleware::from_fn_with_state(state.clone(), record))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn record(State(state): State<SharedState>, request: Request, next: Next) -> Response {
    let recorded = RecordedRequest {
        method: request.method().to_string(),
        path: request.uri().path().to_string(),
        authorization: request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string),
        ..RecordedRequest::default()
    };
    state.lock().expect("state poisoned").requests.push(recorded);
    next.run(request).await
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        == Some(format!("Bearer {TOKEN}").as_str())
}

type Parts = Vec<(String, String)>;

async fn read_multipart(mut multipart: Multipart) -> (Parts, Parts, Vec<Option<String>>) {
    let mut fields = Vec::new();
    let mut files = Vec::new();
    let mut content_types = Vec::new();
    while let Some(field) = multipart.next_field().await.expect("Invalid multipart body") {
        let name = field.name().unwrap_or_default().to_string();
        match field.file_name().map(str::to_string) {
            Some(file_name) => {
                content_types.push(field.content_type().map(str::to_string));
                field.bytes().await.expect("Failed to read file part");
                files.push((name, file_name));
            }
            None => {
                let text = field.text().await.expect("Failed to read text part");
                fields.push((name, text));
            }
        }
    }
    (fields, files, content_types)
}

async fn login(State(state): State<SharedState>, Json(body): Json<Value>) -> Response {
    let mut state = state.lock().expect("state poisoned");
    state.annotate(|request| request.json = Some(body.clone()));
    if body["login"] == LOGIN && body["password"] == PASSWORD {
        Json(json!({ "token": TOKEN })).into_response()
    } else {
        error(StatusCode::UNAUTHORIZED, "Email/username atau password salah")
    }
}

async fn register(State(state): State<SharedState>, Json(body): Json<Value>) -> Response {
    let mut state = state.lock().expect("state poisoned");
    state.annotate(|request| request.json = Some(body.clone()));
    let taken = state
        .users
        .iter()
        .flatten()
        .any(|user| user["Username"] == body["Username"]);
    if taken {
        return error(StatusCode::CONFLICT, "Username sudah digunakan");
    }
    StatusCode::CREATED.into_response()
}

async fn profile(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return error(StatusCode::UNAUTHORIZED, "Unauthorized");
    }
    let state = state.lock().expect("state poisoned");
    Json(json!({ "user": state.viewer })).into_response()
}

async fn update_profile(
    State(state): State<SharedState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Response {
    if !authorized(&headers) {
        return error(StatusCode::UNAUTHORIZED, "Unauthorized");
    }
    let (fields, files, content_types) = read_multipart(multipart).await;
    let mut state = state.lock().expect("state poisoned");
    for (name, value) in &fields {
        match name.as_str() {
            "fullname" => state.viewer["Fullname"] = json!(value),
            "username" => state.viewer["Username"] = json!(value),
            "email" => state.viewer["Email"] = json!(value),
            _ => {}
        }
    }
    if let Some((_, file_name)) = files.first() {
        state.viewer["PhotoProfile"] = json!(format!("public/uploads/{file_name}"));
    }
    state.annotate(|request| {
        request.fields = fields;
        request.files = files;
        request.content_types = content_types;
    });
    Json(json!({ "message": "Profile updated" })).into_response()
}

async fn deactivate(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return error(StatusCode::UNAUTHORIZED, "Unauthorized");
    }
    StatusCode::OK.into_response()
}

async fn users(State(state): State<SharedState>) -> Json<Value> {
    Json(json!({ "users": state.lock().expect("state poisoned").users }))
}

async fn following(State(state): State<SharedState>) -> Json<Value> {
    Json(json!({ "following": state.lock().expect("state poisoned").following }))
}

async fn followers(State(state): State<SharedState>) -> Json<Value> {
    Json(json!({ "followers": state.lock().expect("state poisoned").followers }))
}

async fn follow(State(state): State<SharedState>, Path(id): Path<u64>) -> Response {
    let mut state = state.lock().expect("state poisoned");
    let Some(target) = state.users.iter().flatten().find(|u| u["ID"] == id).cloned() else {
        return error(StatusCode::NOT_FOUND, "User tidak ditemukan");
    };
    state.following.get_or_insert_with(Vec::new).push(target);
    StatusCode::OK.into_response()
}

async fn unfollow(State(state): State<SharedState>, Path(id): Path<u64>) -> StatusCode {
    let mut state = state.lock().expect("state poisoned");
    if let Some(following) = state.following.as_mut() {
        following.retain(|user| user["ID"] != id);
    }
    StatusCode::OK
}

async fn feeds(State(state): State<SharedState>) -> Json<Value> {
    Json(json!({ "feeds": state.lock().expect("state poisoned").feeds }))
}

async fn create_feed(
    State(state): State<SharedState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Response {
    if !authorized(&headers) {
        return error(StatusCode::UNAUTHORIZED, "Unauthorized");
    }
    let (fields, files, content_types) = read_multipart(multipart).await;
    let body = fields
        .iter()
        .find(|(name, _)| name == "feed")
        .map(|(_, value)| value.clone())
        .unwrap_or_default();

    let mut state = state.lock().expect("state poisoned");
    let id = state.next_id();
    let mut created = feed(id, &body, &state.viewer);
    created["File"] = json!(
        files
            .iter()
            .map(|(_, file_name)| format!("public/uploads/{file_name}"))
            .collect::<Vec<_>>()
            .join(",")
    );
    state.feeds.get_or_insert_with(Vec::new).insert(0, created);
    state.annotate(|request| {
        request.fields = fields;
        request.files = files;
        request.content_types = content_types;
    });
    (StatusCode::CREATED, Json(json!({ "message": "Feed created" }))).into_response()
}

async fn update_feed(
    State(state): State<SharedState>,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().expect("state poisoned");
    state.annotate(|request| request.json = Some(body.clone()));
    match state.feeds.iter_mut().flatten().find(|feed| feed["ID"] == id) {
        Some(feed) => {
            feed["Feed"] = body["feed"].clone();
            StatusCode::OK.into_response()
        }
        None => error(StatusCode::NOT_FOUND, "Feed tidak ditemukan"),
    }
}

async fn delete_feed(State(state): State<SharedState>, Path(id): Path<u64>) -> Response {
    let mut state = state.lock().expect("state poisoned");
    let viewer_id = state.viewer["ID"].clone();
    let Some(feeds) = state.feeds.as_mut() else {
        return error(StatusCode::NOT_FOUND, "Feed tidak ditemukan");
    };
    match feeds.iter().position(|feed| feed["ID"] == id) {
        Some(index) if feeds[index]["UserID"] != viewer_id => {
            error(StatusCode::FORBIDDEN, "Anda tidak memiliki akses")
        }
        Some(index) => {
            feeds.remove(index);
            StatusCode::OK.into_response()
        }
        None => error(StatusCode::NOT_FOUND, "Feed tidak ditemukan"),
    }
}

async fn like_feed(State(state): State<SharedState>, Path(id): Path<u64>) -> Response {
    let mut state = state.lock().expect("state poisoned");
    let viewer_id = state.viewer["ID"].clone();
    let reaction_id = state.next_id();
    let Some(feed) = state.feeds.iter_mut().flatten().find(|feed| feed["ID"] == id) else {
        return error(StatusCode::NOT_FOUND, "Feed tidak ditemukan");
    };

    let mut reactions = feed["Reactions"].as_array().cloned().unwrap_or_default();
    let before = reactions.len();
    reactions.retain(|reaction| reaction["UserID"] != viewer_id);
    if reactions.len() == before {
        reactions.push(json!({
            "ID": reaction_id,
            "FeedID": id,
            "Reaction": "like",
            "UserID": viewer_id,
            "CreatedAt": CREATED_AT,
        }));
    }
    feed["Reactions"] = json!(reactions);
    StatusCode::OK.into_response()
}

async fn add_comment(
    State(state): State<SharedState>,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().expect("state poisoned");
    state.annotate(|request| request.json = Some(body.clone()));
    let comment_id = state.next_id();
    let author = state.viewer.clone();
    let Some(feed) = state.feeds.iter_mut().flatten().find(|feed| feed["ID"] == id) else {
        return error(StatusCode::NOT_FOUND, "Feed tidak ditemukan");
    };

    let mut comments = feed["Comments"].as_array().cloned().unwrap_or_default();
    comments.push(json!({
        "ID": comment_id,
        "Comment": body["comment"],
        "FeedID": id,
        "User": author,
        "CreatedAt": CREATED_AT,
    }));
    feed["Comments"] = json!(comments);
    StatusCode::CREATED.into_response()
}

async fn chatrooms(State(state): State<SharedState>) -> Json<Value> {
    Json(json!({ "chatrooms": state.lock().expect("state poisoned").chatrooms }))
}

async fn create_chatroom(State(state): State<SharedState>, Json(body): Json<Value>) -> Response {
    let mut state = state.lock().expect("state poisoned");
    state.annotate(|request| request.json = Some(body.clone()));
    let id = state.next_id();
    let owner_id = state.viewer["ID"].clone();
    state.chatrooms.get_or_insert_with(Vec::new).push(json!({
        "ID": id,
        "Name": body["name"],
        "IsGroup": body["is_group"],
        "OwnerID": owner_id,
    }));
    StatusCode::CREATED.into_response()
}

async fn messages(State(state): State<SharedState>) -> Json<Value> {
    Json(json!({ "messages": state.lock().expect("state poisoned").messages }))
}

async fn send_message(
    State(state): State<SharedState>,
    Path(_id): Path<u64>,
    multipart: Multipart,
) -> Response {
    let (fields, files, content_types) = read_multipart(multipart).await;
    let mut state = state.lock().expect("state poisoned");
    let id = state.next_id();
    let sender = state.viewer.clone();
    let body = fields
        .iter()
        .find(|(name, _)| name == "message")
        .map(|(_, value)| value.clone())
        .unwrap_or_default();
    let file = files
        .first()
        .map(|(_, file_name)| format!("public/uploads/{file_name}"));
    state.messages.get_or_insert_with(Vec::new).push(json!({
        "ID": id,
        "Message": body,
        "File": file,
        "User": sender,
        "CreatedAt": CREATED_AT,
    }));
    state.annotate(|request| {
        request.fields = fields;
        request.files = files;
        request.content_types = content_types;
    });
    StatusCode::CREATED.into_response()
}

async fn delete_message(State(state): State<SharedState>, Path(id): Path<u64>) -> Response {
    let mut state = state.lock().expect("state poisoned");
    let Some(messages) = state.messages.as_mut() else {
        return error(StatusCode::NOT_FOUND, "Pesan tidak ditemukan");
    };
    let before = messages.len();
    messages.retain(|message| message["ID"] != id);
    if messages.len() == before {
        return error(StatusCode::NOT_FOUND, "Pesan tidak ditemukan");
    }
    StatusCode::OK.into_response()
}
