//! In-process stand-in for the remote API, used by tests.
//!
//! Each endpoint serves whatever reply was configured for it and records the
//! headers and form body of every request it receives.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Form, Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;

#[derive(Debug, Clone)]
enum MockReply {
    Json(Value),
    Raw(String),
    Status(u16),
}

/// What the server saw for one request.
#[derive(Debug, Clone, Default)]
pub(crate) struct SeenRequest {
    pub auth: Option<String>,
    pub user_agent: Option<String>,
    pub origin: Option<String>,
    pub owner: Option<i64>,
    pub form: HashMap<String, String>,
}

#[derive(Default)]
struct Inner {
    replies: HashMap<String, MockReply>,
    requests: HashMap<String, Vec<SeenRequest>>,
}

/// Endpoints are addressed as `login`, `sync`, `write` and `diary`.
#[derive(Clone, Default)]
pub(crate) struct MockServer {
    inner: Arc<Mutex<Inner>>,
}

impl MockServer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(&self, endpoint: &str, body: Value) {
        self.set(endpoint, MockReply::Json(body));
    }

    pub fn reply_raw(&self, endpoint: &str, body: &str) {
        self.set(endpoint, MockReply::Raw(body.to_string()));
    }

    pub fn fail(&self, endpoint: &str, status: u16) {
        self.set(endpoint, MockReply::Status(status));
    }

    pub fn hits(&self, endpoint: &str) -> usize {
        let inner = self.inner.lock().unwrap();
        inner.requests.get(endpoint).map_or(0, Vec::len)
    }

    pub fn last_request(&self, endpoint: &str) -> Option<SeenRequest> {
        let inner = self.inner.lock().unwrap();
        inner.requests.get(endpoint).and_then(|r| r.last().cloned())
    }

    /// Binds to an ephemeral local port and returns the base URL.
    pub async fn spawn(&self) -> String {
        let app = Router::new()
            .route("/login/", post(login))
            .route("/v2/sync/", post(sync))
            .route("/write/", post(write))
            .route("/diary/all_by_ids/{owner}/", post(diary))
            .with_state(self.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}", addr)
    }

    fn set(&self, endpoint: &str, reply: MockReply) {
        let mut inner = self.inner.lock().unwrap();
        inner.replies.insert(endpoint.to_string(), reply);
    }

    fn record(&self, endpoint: &str, seen: SeenRequest) -> Response {
        let mut inner = self.inner.lock().unwrap();
        inner
            .requests
            .entry(endpoint.to_string())
            .or_default()
            .push(seen);

        match inner.replies.get(endpoint) {
            Some(MockReply::Json(body)) => Json(body.clone()).into_response(),
            Some(MockReply::Raw(body)) => (StatusCode::OK, body.clone()).into_response(),
            Some(MockReply::Status(code)) => StatusCode::from_u16(*code)
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
                .into_response(),
            None => StatusCode::NOT_FOUND.into_response(),
        }
    }
}

fn seen(headers: &HeaderMap, form: HashMap<String, String>, owner: Option<i64>) -> SeenRequest {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    SeenRequest {
        auth: header("auth"),
        user_agent: header("user-agent"),
        origin: header("origin"),
        owner,
        form,
    }
}

async fn login(
    State(server): State<MockServer>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    server.record("login", seen(&headers, form, None))
}

async fn sync(
    State(server): State<MockServer>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    server.record("sync", seen(&headers, form, None))
}

async fn write(
    State(server): State<MockServer>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    server.record("write", seen(&headers, form, None))
}

async fn diary(
    State(server): State<MockServer>,
    Path(owner): Path<i64>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    server.record("diary", seen(&headers, form, Some(owner)))
}
