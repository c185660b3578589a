//! In-process mock of the usuarios REST API.
//!
//! Mirrors the server's contract: `GET`/`POST /api/usuarios/`,
//! `PUT`/`DELETE /api/usuarios/{id}/`, list ordered by descending id,
//! unique emails, 0..=100 ages. Reads and writes can be made to fail with a
//! 500 to exercise the client's fallback paths.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use cadastro_client::{ApiClient, ApiConfig, RecordStore};
use cadastro_engine::{NewUsuario, Usuario, UsuarioId, MAX_AGE};
use serde_json::json;

#[derive(Debug, Default)]
struct Inner {
    usuarios: Vec<Usuario>,
    next_id: UsuarioId,
    fail_reads: bool,
    fail_writes: bool,
    requests: usize,
}

/// Shared handle to the mock's state.
#[derive(Debug, Clone, Default)]
pub struct MockApi {
    inner: Arc<Mutex<Inner>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the server with users, assigning ids in order.
    pub fn with_users(self, users: &[(&str, &str, u8)]) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            for (name, email, age) in users {
                inner.next_id += 1;
                let id = inner.next_id;
                inner
                    .usuarios
                    .push(Usuario::new(id, *name, *email, Some(*age)));
            }
        }
        self
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.inner.lock().unwrap().fail_reads = fail;
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.inner.lock().unwrap().fail_writes = fail;
    }

    /// Number of requests handled so far.
    pub fn requests(&self) -> usize {
        self.inner.lock().unwrap().requests
    }

    /// Server-side users, ordered by descending id.
    pub fn users(&self) -> Vec<Usuario> {
        let mut users = self.inner.lock().unwrap().usuarios.clone();
        users.sort_by(|a, b| b.id.cmp(&a.id));
        users
    }

    /// Serve on an ephemeral port and return the base URL.
    pub async fn spawn(&self) -> String {
        let app = Router::new()
            .route("/api/usuarios/", get(list).post(create))
            .route("/api/usuarios/{id}/", put(update).delete(remove))
            .with_state(self.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{addr}")
    }
}

/// A base URL nothing listens on.
pub const UNREACHABLE_URL: &str = "http://127.0.0.1:1";

/// Client that ignores proxy settings from the environment.
pub fn api_client(base_url: &str) -> ApiClient {
    let client = ApiClient::client_builder().no_proxy().build().unwrap();
    ApiClient::with_client(client, &ApiConfig::new(base_url).unwrap())
}

pub fn record_store(base_url: &str) -> RecordStore {
    RecordStore::new(api_client(base_url))
}

fn server_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"error": "simulated failure"})),
    )
        .into_response()
}

fn validate(inner: &Inner, body: &NewUsuario, except: Option<UsuarioId>) -> Option<Response> {
    if body.name.trim().is_empty() || body.email.trim().is_empty() || body.age > MAX_AGE {
        return Some((StatusCode::BAD_REQUEST, Json(json!({"error": "invalid"}))).into_response());
    }
    let duplicate = inner
        .usuarios
        .iter()
        .any(|u| u.email == body.email && Some(u.id) != except);
    if duplicate {
        return Some(
            (
                StatusCode::BAD_REQUEST,
                Json(json!({"email": ["usuario with this email already exists."]})),
            )
                .into_response(),
        );
    }
    None
}

async fn list(State(api): State<MockApi>) -> Response {
    {
        let mut inner = api.inner.lock().unwrap();
        inner.requests += 1;
        if inner.fail_reads {
            return server_error();
        }
    }
    Json(api.users()).into_response()
}

async fn create(State(api): State<MockApi>, Json(body): Json<NewUsuario>) -> Response {
    let mut inner = api.inner.lock().unwrap();
    inner.requests += 1;
    if inner.fail_writes {
        return server_error();
    }
    if let Some(rejection) = validate(&inner, &body, None) {
        return rejection;
    }

    inner.next_id += 1;
    let usuario = Usuario::new(inner.next_id, body.name, body.email, Some(body.age));
    inner.usuarios.push(usuario.clone());

    (StatusCode::CREATED, Json(usuario)).into_response()
}

async fn update(
    State(api): State<MockApi>,
    Path(id): Path<UsuarioId>,
    Json(body): Json<NewUsuario>,
) -> Response {
    let mut inner = api.inner.lock().unwrap();
    inner.requests += 1;
    if inner.fail_writes {
        return server_error();
    }
    if let Some(rejection) = validate(&inner, &body, Some(id)) {
        return rejection;
    }

    match inner.usuarios.iter_mut().find(|u| u.id == id) {
        Some(usuario) => {
            usuario.name = body.name;
            usuario.email = body.email;
            usuario.age = Some(body.age);
            Json(usuario.clone()).into_response()
        }
        None => (StatusCode::NOT_FOUND, Json(json!({"error": "not found"}))).into_response(),
    }
}

async fn remove(State(api): State<MockApi>, Path(id): Path<UsuarioId>) -> Response {
    let mut inner = api.inner.lock().unwrap();
    inner.requests += 1;
    if inner.fail_writes {
        return server_error();
    }

    let before = inner.usuarios.len();
    inner.usuarios.retain(|u| u.id != id);
    if inner.usuarios.len() == before {
        return (StatusCode::NOT_FOUND, Json(json!({"error": "not found"}))).into_response();
    }

    StatusCode::NO_CONTENT.into_response()
}
